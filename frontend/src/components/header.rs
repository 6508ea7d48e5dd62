use yew::prelude::*;

const GUIDANCE_STEPS: [(&str, &str); 7] = [
    ("Consult a Doctor", "Get a professional diagnosis and treatment plan."),
    ("Follow Treatment", "Take prescribed medications and rest."),
    ("Manage Symptoms", "Use over-the-counter meds for fever and pain as advised."),
    ("Stay Hydrated", "Drink plenty of fluids."),
    ("Monitor Your Condition", "Watch for worsening symptoms and seek help if needed."),
    ("Practice Good Hygiene", "Wash hands often and avoid spreading germs."),
    ("Consider Vaccination", "Get vaccinated for pneumonia and flu if recommended."),
];

/// Renders the page title and the pneumonia guidance
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-lungs"></i> {" Predictive Risk Assessment for Pneumonia using Chest X-Ray"}</h1>
            <section class="guidance">
                <p><strong>{"Steps to Follow if You Have Pneumonia:"}</strong></p>
                <ol>
                    { for GUIDANCE_STEPS.iter().map(|(title, detail)| html! {
                        <li><strong>{ *title }</strong>{ format!(": {}", detail) }</li>
                    })}
                </ol>
            </section>
            <p class="subtitle">{"Upload your chest X-ray to the machine learning model."}</p>
        </header>
    }
}
