#[cfg(feature = "hydrate")]
mod browser;
mod contact;
mod cursor_hud;
mod features;
mod hero;
mod history;
mod icons;
mod motion;
mod proof;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{components::*, path};

use crate::content::{build_year, portfolio};
use crate::links::tel_url;
use contact::Contact;
use cursor_hud::CursorHud;
use features::Features;
use hero::Hero;
use history::{EducationTimeline, Experience, Skills};
use icons::{Icon, IconKind};
use motion::{use_page_motion, use_smooth_anchors, SITE_HEADER_ID};
use proof::Proof;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <meta name="description" content="Monochrome, grid-first brutalist portfolio" />
                <link rel="shortcut icon" type="image/ico" href="/favicon.ico" />
                <link rel="stylesheet" id="leptos" href="/pkg/portfolio-site.css" />
                <MetaTags />
            </head>
            <body class="font-mono">
                <App />
            </body>
        </html>
    }
}

/// Page-wide light/dark inversion, owned by [`App`].
#[derive(Debug, Clone, Copy)]
pub struct Inverted(pub RwSignal<bool>);

pub const INVERT_CLASS: &str = "invert";

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let inverted = RwSignal::new(false);
    provide_context(Inverted(inverted));

    #[cfg(feature = "hydrate")]
    {
        let set_root_class = |on: bool| {
            let Some(root) = document().document_element() else {
                return;
            };
            let classes = root.class_list();
            let res = if on {
                classes.add_1(INVERT_CLASS)
            } else {
                classes.remove_1(INVERT_CLASS)
            };
            if let Err(e) = res {
                log::warn!("couldn't toggle {INVERT_CLASS}: {e:?}");
            }
        };
        Effect::new(move |_| set_root_class(inverted.get()));
        on_cleanup(move || set_root_class(false));
    }

    view! {
        <Title formatter=|title| format!("{} - {title}", portfolio().owner) />

        <Router>
            <Routes fallback=|| view! { <NotFound /> }>
                <Route path=path!("/") view=HomePage />
            </Routes>
        </Router>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    use_smooth_anchors();
    use_page_motion();

    view! {
        <Title text="Brutalist Portfolio" />
        <main class="min-h-dvh grid grid-rows-[auto_1fr_auto]">
            <SkipLink />
            <Header />
            <div id="content" class="px-4 sm:px-6 lg:px-8 max-w-screen-2xl mx-auto w-full">
                <Hero />
                <Proof />
                <Features />
                <EducationTimeline />
                <Skills />
                <Experience />
                <Contact />
            </div>
            <Footer />
            <CursorHud />
        </main>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    #[cfg(feature = "ssr")]
    if let Some(res) = use_context::<leptos_axum::ResponseOptions>() {
        res.set_status(http::StatusCode::NOT_FOUND);
    }

    view! {
        <Title text="Not Found" />
        <main class="min-h-dvh grid place-items-center">
            <div class="outlined p-6 text-center">
                <h1 class="text-3xl font-extrabold mb-4">"404"</h1>
                <a href="/" class="outlined px-4 py-2">
                    "Back home"
                </a>
            </div>
        </main>
    }
}

#[component]
fn SkipLink() -> impl IntoView {
    view! {
        <a
            href="#content"
            class="sr-only focus:not-sr-only focus:fixed focus:top-2 focus:left-2 outlined bg-white px-3 py-2 text-sm z-50"
        >
            "Skip to content"
        </a>
    }
}

#[component]
fn Header() -> impl IntoView {
    let Inverted(inverted) = expect_context::<Inverted>();
    let portfolio = portfolio();

    view! {
        <header
            id=SITE_HEADER_ID
            class="sticky top-0 z-40 bg-white/70 backdrop-blur supports-[backdrop-filter]:bg-white/60 border-b border-black"
        >
            <nav class="max-w-screen-2xl mx-auto px-4 sm:px-6 lg:px-8 py-3 grid grid-cols-12 items-center gap-2">
                <a
                    href="#content"
                    class="col-span-6 sm:col-span-3 font-mono text-xs outlined px-2 py-1"
                    aria-label="Home"
                >
                    {portfolio.owner.clone()}
                </a>
                <ul class="hidden sm:flex col-span-6 gap-3 justify-center">
                    {portfolio
                        .nav
                        .iter()
                        .map(|link| {
                            view! {
                                <li>
                                    <a
                                        class="outlined px-2 py-1 text-sm hover:bg-black hover:text-white focus-visible:outline-2"
                                        href=link.href.clone()
                                    >
                                        {link.label.clone()}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
                <div class="col-span-6 sm:col-span-3 flex justify-end gap-2">
                    <button
                        on:click=move |_| inverted.update(|on| *on = !*on)
                        class="outlined px-2 py-1 text-xs"
                        aria-pressed=move || inverted.get().to_string()
                        aria-label="Invert light/dark"
                        title="Invert"
                    >
                        "INVERT"
                    </button>
                </div>
            </nav>
        </header>
    }
}

#[component]
fn Footer() -> impl IntoView {
    let portfolio = portfolio();
    let contact = &portfolio.contact;
    let phone = tel_url(&contact.phone);
    let site_map = std::iter::once(("Home".to_string(), "#content".to_string()))
        .chain(portfolio.nav.iter().map(|n| (n.label.clone(), n.href.clone())))
        .map(|(label, href)| {
            view! {
                <li class="outlined px-2 py-1">
                    <a class="block focus-visible:outline-2" href=href>
                        {label}
                    </a>
                </li>
            }
        })
        .collect_view();

    view! {
        <footer class="mt-16 border-t border-black">
            <div class="max-w-screen-2xl mx-auto px-4 sm:px-6 lg:px-8 py-8 grid grid-cols-12 gap-3">
                <nav class="col-span-12 md:col-span-8" aria-label="Site map">
                    <ul class="grid grid-cols-2 sm:grid-cols-4 gap-2">
                        {site_map}
                        <li class="outlined px-2 py-1">
                            <a
                                class="block focus-visible:outline-2"
                                href=portfolio.resume.href.clone()
                                download=portfolio.resume.file_name.clone()
                            >
                                "Resume"
                            </a>
                        </li>
                    </ul>
                </nav>
                <div class="col-span-12 md:col-span-4 flex md:justify-end items-start gap-3">
                    <a
                        href=contact.github_url.clone()
                        aria-label="GitHub"
                        class="outlined p-2"
                        target="_blank"
                        rel="noreferrer"
                    >
                        <Icon kind=IconKind::GitHub />
                    </a>
                    <a
                        href=contact.linkedin_url.clone()
                        aria-label="LinkedIn"
                        class="outlined p-2"
                        target="_blank"
                        rel="noreferrer"
                    >
                        <Icon kind=IconKind::LinkedIn />
                    </a>
                    <a
                        href=phone
                        aria-label="Phone"
                        class="outlined p-2"
                    >
                        <Icon kind=IconKind::Phone />
                    </a>
                </div>
            </div>
            <div class="text-center text-xs font-mono py-3 border-t border-black">
                {format!("© {} {} - {}", build_year(), portfolio.owner, portfolio.role)}
            </div>
        </footer>
    }
}
