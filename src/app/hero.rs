use leptos::{html, prelude::*};

use super::motion::use_typewriter;
use crate::content::portfolio;

pub const TERMINAL_SCRIPT: &[&str] = &[
    "$ curl -s https://api.github.com/users/cypherpunkx/repos",
    "[",
    r#"  { "name": "go-gin-api", "language": "Go" },"#,
    r#"  { "name": "react-dashboard", "language": "TypeScript" },"#,
    r#"  { "name": "mysql-optimizer", "language": "JavaScript" }"#,
    "]",
    "$ _",
];

#[component]
pub fn Hero() -> impl IntoView {
    let portfolio = portfolio();
    let term_ref = NodeRef::<html::Pre>::new();
    use_typewriter(term_ref, TERMINAL_SCRIPT);

    view! {
        <section class="relative my-12 sm:my-16 lg:my-24 grid grid-cols-12 gap-3">
            <div class="col-span-12 lg:col-span-7 relative z-10">
                <h1 class="hero-heading text-5xl sm:text-7xl leading-none font-black tracking-tight outlined p-2">
                    {portfolio.headline.clone()}
                </h1>
                <p class="hero-subtitle mt-4 text-lg sm:text-xl outlined p-2">
                    {portfolio.tagline.clone()}
                </p>
                <div class="mt-6 flex gap-3">
                    <a
                        href=portfolio.resume.href.clone()
                        download=portfolio.resume.file_name.clone()
                        class="outlined px-4 py-3 text-base font-medium hover:bg-black hover:text-white"
                        aria-label="Get Resume"
                    >
                        "Get Resume"
                    </a>
                    <a
                        href="#features"
                        class="outlined px-4 py-3 text-base font-medium hover:bg-black hover:text-white"
                        aria-label="View Work"
                    >
                        "View Work"
                    </a>
                </div>
            </div>

            <div class="col-span-12 lg:col-span-5 relative min-h-[260px] sm:min-h-[320px]">
                <pre
                    node_ref=term_ref
                    aria-label="Live terminal demo"
                    class="terminal absolute inset-0 overflow-auto p-4 text-sm"
                ></pre>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{Cursor, Script};

    #[test]
    fn test_terminal_script_types_out_fully() {
        let script = Script::new(TERMINAL_SCRIPT);
        let mut cursor = Cursor::new();
        while !cursor.is_done(&script) {
            cursor.step(&script);
        }
        assert_eq!(cursor.output(), script.rendered());
        assert_eq!(cursor.output(), TERMINAL_SCRIPT.join("\n"));
        assert!(cursor.output().ends_with("$ _"));
    }
}
