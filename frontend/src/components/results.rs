use super::super::Model;
use shared::Outcome;
use yew::prelude::*;

pub fn render_results(model: &Model) -> Html {
    let Some(response) = &model.response else {
        return html! {};
    };

    html! {
        <div class="results-container">
            {
                if let Some(raw) = &response.raw_response {
                    html! {
                        <div class="raw-response">
                            <p>{"Raw response from the endpoint:"}</p>
                            <pre>{ raw }</pre>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
            { render_outcome(&response.outcome) }
        </div>
    }
}

fn render_outcome(outcome: &Outcome) -> Html {
    match outcome {
        Outcome::Prediction {
            label,
            confidence,
            probability,
        } => html! {
            <div class="result-header">
                <h2><i class="fa-solid fa-stethoscope"></i>{ format!(" Prediction: {}", label) }</h2>
                <div class="confidence-meter">
                    <div class="meter-label">{ format!("Confidence: {}", confidence) }</div>
                    {
                        if let Some(p) = probability {
                            let width = (p * 100.0).clamp(0.0, 100.0);
                            html! {
                                <div class="meter">
                                    <div class="meter-fill" style={format!("width: {}%", width)}></div>
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                </div>
            </div>
        },
        Outcome::DecodeError { message } | Outcome::InvocationError { message } => html! {
            <div class="error-message">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ message }</p>
            </div>
        },
    }
}
