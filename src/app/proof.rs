use leptos::prelude::*;

use crate::content::portfolio;

#[component]
pub fn Proof() -> impl IntoView {
    view! {
        <section id="proof" class="my-12 sm:my-16" aria-label="Proof / Logo Wall">
            <div class="outlined p-3">
                <div class="grid grid-cols-2 sm:grid-cols-4 lg:grid-cols-8 gap-4 items-center">
                    {portfolio()
                        .logos
                        .iter()
                        .map(|label| view! { <Logo label=label.clone() /> })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn Logo(label: String) -> impl IntoView {
    view! {
        <div class="logo-item flex items-center justify-center h-14 outlined-soft">
            <svg viewBox="0 0 200 60" class="w-full h-full" role="img" aria-label=label.clone()>
                <rect x="1" y="1" width="198" height="58" fill="none" stroke="currentColor" stroke-width="2" />
                <text
                    x="50%"
                    y="50%"
                    dominant-baseline="middle"
                    text-anchor="middle"
                    font-family="monospace"
                    font-size="22"
                    fill="currentColor"
                >
                    {label}
                </text>
            </svg>
        </div>
    }
}
