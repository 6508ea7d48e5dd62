use super::super::Msg;
use super::super::{Model, UploadedFile};
use super::utils::extract_jpg_file;
use crate::api::request_prediction;
use gloo_file::{File as GlooFile, ObjectUrl};
use gloo_storage::{LocalStorage, Storage};
use shared::InferenceResponse;
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent, FileList};
use yew::prelude::*;

const THEME_KEY: &str = "theme";

/// Every new upload replaces the previous one and is analyzed right away.
pub fn handle_file_selected(model: &mut Model, ctx: &Context<Model>, file: GlooFile) -> bool {
    let preview_url = ObjectUrl::from(file.clone());

    let seq = model.status.begin();
    model.upload = Some(UploadedFile {
        file: file.clone(),
        preview_url,
    });
    model.response = None;

    send_prediction_request(ctx, seq, file);
    true
}

pub fn handle_prediction_received(
    model: &mut Model,
    seq: u64,
    response: InferenceResponse,
) -> bool {
    if !model.status.succeed(seq) {
        log::debug!("Dropping reply {} for a replaced upload", response.request_id);
        return false;
    }

    log::info!(
        "Prediction {} finished with {}",
        response.request_id,
        response.outcome.kind()
    );
    model.response = Some(response);
    true
}

pub fn load_theme() -> String {
    let theme: String = LocalStorage::get(THEME_KEY).unwrap_or_else(|_| "light".to_string());
    apply_theme(&theme);
    theme
}

pub fn handle_toggle_theme(model: &mut Model) -> bool {
    model.theme = if model.theme == "light" {
        "dark".to_string()
    } else {
        "light".to_string()
    };
    apply_theme(&model.theme);

    if let Err(e) = LocalStorage::set(THEME_KEY, &model.theme) {
        log::warn!("Could not persist theme: {}", e);
    }
    true
}

fn apply_theme(theme: &str) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };

    let result = if theme == "dark" {
        body.class_list().add_1("dark-mode")
    } else {
        body.class_list().remove_1("dark-mode")
    };
    if result.is_err() {
        log::warn!("Could not switch to {} theme", theme);
    }
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(file_list) = event.data_transfer().and_then(|dt| dt.files()) {
        process_file_list(ctx, file_list);
    }

    true
}

pub fn handle_paste(ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    if let Some(file_list) = event.clipboard_data().and_then(|dt| dt.files()) {
        if file_list.length() > 0 {
            event.prevent_default();
            process_file_list(ctx, file_list);
            return true;
        }
    }
    false
}

fn process_file_list(ctx: &Context<Model>, file_list: FileList) {
    match extract_jpg_file(&file_list) {
        Ok(file) => ctx.link().send_message(Msg::FileSelected(file)),
        Err(message) => ctx.link().send_message(Msg::SetError(Some(message))),
    }
}

pub fn send_prediction_request(ctx: &Context<Model>, seq: u64, file: GlooFile) {
    log::info!("Uploading {} ({} bytes) as request {}", file.name(), file.size(), seq);
    let link = ctx.link().clone();

    spawn_local(async move {
        match request_prediction(&file).await {
            Ok(response) => link.send_message(Msg::PredictionReceived(seq, response)),
            Err(message) => link.send_message(Msg::RequestFailed(seq, message)),
        }
    });
}
