//! Shared helpers for the view integration tests.
//!
//! Each test builds an axum [`Router`] standing in for the ML API, serves
//! it on an ephemeral local port and points an [`MlApi`] at it.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use serde_json::{json, Value};

use mlboard_client::MlApi;

/// Serve `router` on `127.0.0.1:0` and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Client for `base_url` with a short timeout.
pub fn api(base_url: &str) -> Arc<MlApi> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    Arc::new(MlApi::with_client(client, base_url.to_string()))
}

/// Base URL of a port nothing listens on.
pub async fn closed_port() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Request counter shared between a handler and the test body.
#[derive(Clone, Default)]
pub struct Hits(Arc<AtomicUsize>);

impl Hits {
    /// Record a hit and return how many came before it.
    pub fn record(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst)
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

// ---------------------------------------------------------------------------
// Payload fixtures
// ---------------------------------------------------------------------------

pub fn dataset_info(total: u64) -> Value {
    json!({
        "total_registros": total,
        "distribución_ataques": {"normal": 800, "neptune": 150, "satan": 50},
        "usando_datos_personalizados": false,
    })
}

pub fn dataset_visualizations() -> Value {
    json!({
        "estadisticas_caracteristicas": [
            {"nombre": "src_bytes", "media": 3025.61, "std": 988218.1, "min": 0, "max": 1379963888},
            {"nombre": "dst_bytes", "media": 868.53, "std": 33040.0, "min": 0, "max": 1309937401},
        ],
        "scatter_data": [
            {"src_bytes": 215.0, "dst_bytes": 45076.0, "tipo": "normal"},
            {"src_bytes": 0.0, "dst_bytes": 0.0, "tipo": "neptune"},
        ],
    })
}

pub fn dataset_status() -> Value {
    json!({
        "usando_datos_personalizados": true,
        "total_registros": 1000,
        "tipos_ataque": 3,
        "estado": "listo",
    })
}

fn model(name: &str, accuracy: f64) -> Value {
    json!({
        "model_name": name,
        "metrics": {"accuracy": accuracy, "precision": 0.9, "recall": 0.88, "f1_score": 0.89},
        "confusion_matrix": [[50, 10], [5, 35]],
        "training_time_s": 2.5,
        "cross_validation_score": 0.87,
    })
}

pub fn model_comparison() -> Value {
    json!({
        "models": [
            model("Random Forest", 0.95),
            model("Logistic Regression", 0.89),
            model("Random Forest", 0.10),
        ]
    })
}

pub fn roc_curve() -> Value {
    json!({
        "fpr": [0.0, 0.1, 0.3, 1.0],
        "tpr": [0.0, 0.7, 0.9, 1.0],
        "auc": 0.9123,
        "thresholds": [1.0, 0.8, 0.5, 0.0],
    })
}

pub fn spam_result() -> Value {
    json!({
        "es_spam": true,
        "confianza": 92.4,
        "puntuacion_spam": 0.924,
        "características": {"tiene_urls": true, "palabras_spam": 6},
    })
}

pub fn split_result() -> Value {
    json!({
        "tamaño_entrenamiento": 75584,
        "tamaño_validacion": 25195,
        "tamaño_prueba": 25194,
        "estratificado": true,
        "semilla_aleatoria": 42,
    })
}

pub fn pipeline() -> Value {
    json!({
        "pipeline_completo": true,
        "total_pasos": 3,
        "pasos": [
            {"paso": 1, "nombre": "Limpieza", "descripcion": "Valores nulos", "completado": true},
            {"paso": 2, "nombre": "Codificación", "descripcion": "One-hot", "completado": true},
            {"paso": 3, "nombre": "Escalado", "descripcion": "StandardScaler", "completado": true},
        ],
        "caracteristicas_originales": 41,
        "caracteristicas_finales": 122,
        "tiempo_procesamiento_ms": 1834,
    })
}
