//! Turns view state into printable panels.

use serde_json::{json, Value};

use mlboard_client::views::{DatasetData, ModelEvaluation, PreprocessingView, ViewState};
use mlboard_core::preprocessing::{PipelineInfo, SplitResult};
use mlboard_core::render;
use mlboard_core::spam::SpamAnalysisResult;

/// Wrap a view's rendered body with its loading/error status. A failed
/// view shows only its error.
fn panel<T>(title: &str, state: &ViewState<T>, body: impl FnOnce(&T) -> Value) -> Value {
    match (&state.error, &state.data) {
        (Some(error), _) => json!({"title": title, "error": error}),
        (None, Some(data)) => json!({
            "title": title,
            "loaded_at": state.loaded_at,
            "data": body(data),
        }),
        (None, None) => json!({"title": title, "loading": state.loading}),
    }
}

pub fn dataset(state: &ViewState<DatasetData>) -> Value {
    panel("Visualización del Dataset", state, |data| {
        let viz = &data.visualizations;
        json!({
            "status": render::status_line(data.status.as_ref()),
            "overview": render::dataset_overview(&data.summary),
            "attack_distribution": render::attack_chart_rows(&data.summary),
            "attack_types": render::attack_badges(&data.summary),
            "feature_statistics": render::feature_stat_rows(&viz.feature_statistics),
            "scatter": render::scatter_chart(&viz.scatter_points),
        })
    })
}

pub fn model_evaluation(state: &ViewState<ModelEvaluation>) -> Value {
    panel("Model Evaluation", state, |data| {
        let selected = data.selected_model();
        json!({
            "selected": data.selected,
            "cards": selected.map(render::model_cards),
            "comparison": render::comparison_rows(&data.models),
            "models": render::model_detail_rows(&data.models, data.selected.as_deref()),
            "confusion_matrix": selected
                .map(|model| render::confusion_cells(&model.metrics.confusion_matrix)),
            "roc": render::roc_chart(&data.roc),
            "auc": render::auc_label(&data.roc),
        })
    })
}

pub fn spam(state: &ViewState<SpamAnalysisResult>) -> Value {
    panel("Detector de Spam", state, |result| json!(render::spam_verdict(result)))
}

pub fn preprocessing(view: &PreprocessingView) -> Value {
    let ratios = view.ratios();
    json!({
        "title": "Preprocesamiento de Datos",
        "ratios": {
            "train": ratios.train,
            "validation": ratios.validation,
            "test": ratios.test,
        },
        "stratified": render::bool_label(view.stratified()),
        "dataset_size": render::format_thousands(view.dataset_size()),
        "preview": render::split_preview_rows(&view.preview()),
        "split": split(&view.split_state()),
        "pipeline": pipeline(&view.pipeline_state()),
    })
}

fn split(state: &ViewState<SplitResult>) -> Value {
    panel("Resultados de la División", state, |result| {
        json!(render::split_result_rows(result))
    })
}

fn pipeline(state: &ViewState<PipelineInfo>) -> Value {
    panel("Pipeline de Transformación", state, |info| {
        json!({
            "complete": render::bool_label(info.complete),
            "steps": render::pipeline_step_rows(info),
            "summary": render::pipeline_summary(info),
        })
    })
}
