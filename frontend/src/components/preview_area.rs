use super::super::Model;
use yew::prelude::*;

pub fn render_preview_area(model: &Model) -> Html {
    let Some(upload) = &model.upload else {
        return html! {};
    };

    html! {
        <div id="preview-container">
            <figure>
                <img id="actual-image-preview"
                    src={upload.preview_url.to_string()}
                    alt={upload.file.name()}
                    style="width: 100%; object-fit: contain; margin-bottom: 10px;" />
                <figcaption>{"Uploaded Image."}</figcaption>
            </figure>
            {
                if model.status.loading {
                    html! { <p><i class="fa-solid fa-spinner fa-spin"></i>{" Analyzing..."}</p> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
