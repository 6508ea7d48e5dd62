mod api;
mod components;

use components::handlers::{
    handle_drop, handle_file_selected, handle_paste, handle_prediction_received,
    handle_toggle_theme, load_theme,
};
use components::header::render_header;
use components::preview_area::render_preview_area;
use components::request_status::RequestStatus;
use components::results::render_results;
use components::theme_toggle::render_theme_toggle;
use components::upload_section::render_upload_section;
use components::utils::render_error_message;
use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::InferenceResponse;
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

pub struct UploadedFile {
    pub file: GlooFile,
    pub preview_url: ObjectUrl,
}

pub enum Msg {
    FileSelected(GlooFile),
    PredictionReceived(u64, InferenceResponse),
    RequestFailed(u64, String),

    SetError(Option<String>),
    SetDragging(bool),
    ToggleTheme,

    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

pub struct Model {
    pub upload: Option<UploadedFile>,
    pub response: Option<InferenceResponse>,
    pub status: RequestStatus,
    pub is_dragging: bool,
    pub theme: String,
    _paste_listener: Option<EventListener>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut model = Self {
            upload: None,
            response: None,
            status: RequestStatus::default(),
            is_dragging: false,
            theme: load_theme(),
            _paste_listener: None,
        };

        if let Some(window) = web_sys::window() {
            let link = ctx.link().clone();
            let listener = EventListener::new(&window, "paste", move |event| {
                if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                    link.send_message(Msg::HandlePaste(clipboard_event.clone()));
                }
            });
            model._paste_listener = Some(listener);
        }

        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileSelected(file) => handle_file_selected(self, ctx, file),
            Msg::PredictionReceived(seq, reply) => handle_prediction_received(self, seq, reply),
            Msg::RequestFailed(seq, error) => self.status.fail(seq, error),

            Msg::SetError(error) => {
                self.status.set_error(error);
                true
            }
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::ToggleTheme => handle_toggle_theme(self),

            Msg::HandleDrop(event) => handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handle_paste(ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header() }
                <div class="top-right">
                    { render_theme_toggle(self, ctx) }
                </div>

                <main class="main-content">
                    { render_upload_section(self, ctx) }
                    { render_error_message(self) }
                    { render_preview_area(self) }
                    { render_results(self) }
                </main>

                <footer class="app-footer">
                    <p>{"Predictions come from a hosted model and are not a medical diagnosis."}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
