use super::super::Model;
use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use shared::is_accepted_file_name;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::FileList;
use yew::prelude::*;

// Debounce function to limit button events
pub fn debounce<F>(duration: i32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));
    let timeout_clone = Rc::clone(&timeout);

    Callback::from(move |_| {
        let mut timeout_ref = timeout_clone.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        let new_timeout = Timeout::new(duration as u32, move || {
            inner_callback();
        });

        *timeout_ref = Some(new_timeout);
    })
}

/// Picks the single `.jpg` out of a file list, or explains why it can't.
pub fn extract_jpg_file(file_list: &FileList) -> Result<GlooFile, String> {
    match file_list.length() {
        0 => return Err("No file selected.".into()),
        1 => {}
        _ => return Err("Please choose a single .jpg file.".into()),
    }

    let file = file_list
        .item(0)
        .ok_or_else(|| "No file selected.".to_string())?;

    if is_accepted_file_name(&file.name()) {
        Ok(GlooFile::from(file))
    } else {
        log::warn!("Rejected file: {}", file.name());
        Err(format!("{} is not a .jpg file.", file.name()))
    }
}

pub fn render_error_message(model: &Model) -> Html {
    if let Some(error_msg) = &model.status.error {
        html! {
            <div class="error-message">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ error_msg }</p>
            </div>
        }
    } else {
        html! {}
    }
}
