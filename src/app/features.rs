use leptos::prelude::*;
use leptos_use::{use_clipboard_with_options, UseClipboardOptions, UseClipboardReturn};

use crate::snippets::{panel_id, snippet, tab_id, SnippetKind, SnippetLang};

/// How long the "Copied!" tooltip stays up.
const COPIED_RESET_MS: f64 = 1200.0;

#[component]
pub fn Features() -> impl IntoView {
    view! {
        <section id="features" class="my-16">
            <h2 class="text-3xl sm:text-4xl font-extrabold outlined p-2 mb-6">
                "Selected Projects: API Development"
            </h2>
            <div class="grid grid-cols-12 gap-4">
                <div class="col-span-12 lg:col-span-4">
                    <CodeCard title="Fetch Projects" kind=SnippetKind::Projects />
                </div>
                <div class="col-span-12 lg:col-span-4">
                    <CodeCard title="Create Issue" kind=SnippetKind::Issue />
                </div>
                <div class="col-span-12 lg:col-span-4">
                    <CodeCard title="Upload Asset" kind=SnippetKind::Upload />
                </div>
            </div>
        </section>
    }
}

/// Request example with language tabs and a copy button. A failed copy
/// leaves the tooltip hidden.
#[component]
fn CodeCard(title: &'static str, kind: SnippetKind) -> impl IntoView {
    let tab = RwSignal::new(SnippetLang::Js);
    let code = Memo::new(move |_| snippet(tab.get(), kind));
    let UseClipboardReturn { copied, copy, .. } = use_clipboard_with_options(
        UseClipboardOptions::default().copied_reset_delay(COPIED_RESET_MS),
    );

    view! {
        <div class="outlined p-0 grid grid-rows-[auto_1fr_auto] h-full">
            <div class="flex items-center justify-between border-b border-black px-3 py-2">
                <span class="font-mono text-sm">{title}</span>
                <div class="relative">
                    <button
                        on:click=move |_| copy(&code.get_untracked())
                        class="outlined px-2 py-1 text-xs"
                        aria-label="Copy code"
                    >
                        "COPY"
                    </button>
                    <Show when=move || copied.get()>
                        <span role="status" class="tooltip">
                            "Copied!"
                        </span>
                    </Show>
                </div>
            </div>
            <div class="border-b border-black">
                <div role="tablist" aria-label=format!("{title} code tabs") class="flex">
                    {SnippetLang::ALL
                        .into_iter()
                        .map(|lang| view! { <Tab kind=kind lang=lang active=tab /> })
                        .collect_view()}
                </div>
            </div>
            <pre
                id=panel_id(kind)
                role="tabpanel"
                aria-labelledby=move || tab_id(kind, tab.get())
                class="p-3 text-sm overflow-auto font-mono bg-white min-h-[220px]"
                aria-live="polite"
            >
                {move || code.get()}
            </pre>
        </div>
    }
}

#[component]
fn Tab(kind: SnippetKind, lang: SnippetLang, active: RwSignal<SnippetLang>) -> impl IntoView {
    let is_active = move || active.get() == lang;
    view! {
        <button
            role="tab"
            aria-selected=move || is_active().to_string()
            aria-controls=panel_id(kind)
            id=tab_id(kind, lang)
            on:click=move |_| active.set(lang)
            class=move || {
                format!(
                    "flex-1 px-2 py-1 outlined text-xs {}",
                    if is_active() { "bg-black text-white" } else { "bg-white" },
                )
            }
        >
            {lang.to_string()}
        </button>
    }
}
