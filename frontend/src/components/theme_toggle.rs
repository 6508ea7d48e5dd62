use super::super::Model;
use super::super::Msg;
use yew::prelude::*;

pub fn render_theme_toggle(model: &Model, ctx: &Context<Model>) -> Html {
    let dark = model.theme == "dark";
    let (icon, title) = if dark {
        ("fa-solid fa-sun", "Switch to Light Mode")
    } else {
        ("fa-solid fa-moon", "Switch to Dark Mode")
    };

    html! {
        <button
            id="theme-toggle"
            class="theme-toggle"
            onclick={ctx.link().callback(|_| Msg::ToggleTheme)}
            {title}
        >
            <i class={icon}></i>
        </button>
    }
}
