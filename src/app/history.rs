use leptos::prelude::*;

use crate::content::portfolio;

#[component]
pub fn EducationTimeline() -> impl IntoView {
    view! {
        <section id="education" class="my-16">
            <h2 class="text-3xl sm:text-4xl font-extrabold outlined p-2 mb-6">"Education"</h2>
            <ol class="grid grid-cols-12 gap-3">
                {portfolio()
                    .education
                    .iter()
                    .map(|it| {
                        view! {
                            <li class="col-span-12 lg:col-span-4 outlined p-3">
                                <div class="text-xs font-mono text-neutral-600">{it.year.clone()}</div>
                                <div class="text-lg font-bold">{it.title.clone()}</div>
                                <div class="text-sm">{it.org.clone()}</div>
                            </li>
                        }
                    })
                    .collect_view()}
            </ol>
        </section>
    }
}

/// Skill groups. `.skill-card` and `.skill-item` carry their own reveals.
#[component]
pub fn Skills() -> impl IntoView {
    view! {
        <section id="skills" class="my-16">
            <h2 class="text-3xl sm:text-4xl font-extrabold outlined p-2 mb-6">"Skills"</h2>
            <div class="grid grid-cols-12 gap-3">
                {portfolio()
                    .skills
                    .iter()
                    .map(|group| {
                        view! {
                            <div class="skill-card col-span-12 sm:col-span-6 lg:col-span-3 outlined p-3">
                                <div class="font-bold mb-2">{group.name.clone()}</div>
                                <ul class="list-disc list-inside">
                                    {group
                                        .items
                                        .iter()
                                        .map(|s| view! { <li class="skill-item">{s.clone()}</li> })
                                        .collect_view()}
                                </ul>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
pub fn Experience() -> impl IntoView {
    view! {
        <section id="experience" class="my-16">
            <h2 class="text-3xl sm:text-4xl font-extrabold outlined p-2 mb-6">"Experience"</h2>
            <div class="grid grid-cols-12 gap-3">
                {portfolio()
                    .experience
                    .iter()
                    .map(|r| {
                        view! {
                            <article class="col-span-12 lg:col-span-6 outlined p-3">
                                <header class="flex items-baseline justify-between">
                                    <h3 class="text-xl font-bold">
                                        {format!("{} · {}", r.role, r.company)}
                                    </h3>
                                    <span class="font-mono text-xs">{r.period.clone()}</span>
                                </header>
                                <ul class="list-disc list-inside mt-2">
                                    {r
                                        .bullets
                                        .iter()
                                        .map(|b| view! { <li>{b.clone()}</li> })
                                        .collect_view()}
                                </ul>
                            </article>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
