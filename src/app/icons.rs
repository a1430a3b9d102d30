use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    GitHub,
    LinkedIn,
    Phone,
    WhatsApp,
    Location,
    Email,
}

impl IconKind {
    fn body(&self) -> &'static str {
        match self {
            IconKind::GitHub => concat!(
                r#"<path d="M15 22v-4a4.8 4.8 0 0 0-1-3.5c3 0 6-2 6-5.5A5.4 5.4 0 0 0 19.5 3 5 5 0 0 0 19 3s-1.5 0-3 2a11.7 11.7 0 0 0-6 0C7.5 3 6 3 6 3a5 5 0 0 0-.5 3.5C5 9 8 11 11 11a4.8 4.8 0 0 0-1 3.5v4"/>"#,
                r#"<path d="M9 18c-4.5 2-5-2-7-2"/>"#,
            ),
            IconKind::LinkedIn => concat!(
                r#"<path d="M16 8a6 6 0 0 1 6 6v7h-4v-7a2 2 0 0 0-2-2 2 2 0 0 0-2 2v7h-4v-7a6 6 0 0 1 6-6Z"/>"#,
                r#"<rect x="2" y="9" width="4" height="12"/>"#,
                r#"<circle cx="4" cy="4" r="2"/>"#,
            ),
            IconKind::Phone => {
                r#"<path d="M22 16.92v3a2 2 0 0 1-2.18 2 19.79 19.79 0 0 1-8.63-3.07 19.5 19.5 0 0 1-6-6 19.79 19.79 0 0 1-3.07-8.67A2 2 0 0 1 4.11 2h3a2 2 0 0 1 2 1.72 12.84 12.84 0 0 0 .7 2.81 2 2 0 0 1-.45 2.11L8.09 9.91a16 16 0 0 0 6 6l1.27-1.27a2 2 0 0 1 2.11-.45 12.84 12.84 0 0 0 2.81.7A2 2 0 0 1 22 16.92z"/>"#
            }
            IconKind::WhatsApp => {
                r#"<path d="M21 11.5a8.38 8.38 0 0 1-.9 3.8 8.5 8.5 0 0 1-7.6 4.7 8.38 8.38 0 0 1-3.8-.9L3 21l1.9-5.7a8.38 8.38 0 0 1-.9-3.8 8.5 8.5 0 0 1 4.7-7.6 8.38 8.38 0 0 1 3.8-.9h.5a8.48 8.48 0 0 1 8 8v.5z"/>"#
            }
            IconKind::Location => concat!(
                r#"<path d="M21 10c0 7-9 13-9 13s-9-6-9-13a9 9 0 0 1 18 0z"/>"#,
                r#"<circle cx="12" cy="10" r="3"/>"#,
            ),
            IconKind::Email => concat!(
                r#"<path d="M4 4h16c1.1 0 2 .9 2 2v12c0 1.1-.9 2-2 2H4c-1.1 0-2-.9-2-2V6c0-1.1.9-2 2-2z"/>"#,
                r#"<polyline points="22,6 12,13 2,6"/>"#,
            ),
        }
    }
}

/// 20px stroke icon.
#[component]
pub fn Icon(kind: IconKind) -> impl IntoView {
    view! {
        <svg
            xmlns="http://www.w3.org/2000/svg"
            width="20"
            height="20"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            aria-hidden="true"
            inner_html=kind.body()
        ></svg>
    }
}
