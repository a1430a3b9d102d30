use leptos::prelude::*;

use super::icons::{Icon, IconKind};
use crate::content::portfolio;
use crate::links::{mailto_url, whatsapp_url};

struct ContactLine {
    label: &'static str,
    value: String,
    icon: IconKind,
    href: Option<String>,
}

#[component]
pub fn Contact() -> impl IntoView {
    let contact = &portfolio().contact;
    let whatsapp = whatsapp_url(&contact.whatsapp_number, &contact.whatsapp_message);

    let lines = [
        ContactLine {
            label: "Location",
            value: contact.location.clone(),
            icon: IconKind::Location,
            href: None,
        },
        ContactLine {
            label: "Email",
            value: contact.email.clone(),
            icon: IconKind::Email,
            href: Some(mailto_url(&contact.email)),
        },
        ContactLine {
            label: "WhatsApp",
            value: contact.whatsapp_display.clone(),
            icon: IconKind::WhatsApp,
            href: Some(whatsapp.clone()),
        },
        ContactLine {
            label: "LinkedIn",
            value: contact.linkedin_display.clone(),
            icon: IconKind::LinkedIn,
            href: Some(contact.linkedin_url.clone()),
        },
    ];

    view! {
        <section id="contact" class="my-16">
            <h2 class="text-3xl sm:text-4xl font-extrabold outlined p-2 mb-6">
                {contact.heading.clone()}
            </h2>
            <div class="grid grid-cols-12 gap-4">
                <div class="contact-main col-span-12 lg:col-span-8 outlined p-4">
                    <div class="mb-4">
                        <h3 class="text-xl font-bold mb-2">{contact.pitch_title.clone()}</h3>
                        <p class="text-base text-gray-700 mb-4">{contact.pitch.clone()}</p>
                    </div>
                    <a
                        href=whatsapp
                        target="_blank"
                        rel="noopener noreferrer"
                        class="outlined px-6 py-3 text-base font-medium hover:bg-black hover:text-white inline-flex items-center gap-3"
                        aria-label="Contact via WhatsApp"
                    >
                        <Icon kind=IconKind::WhatsApp />
                        "Chat di WhatsApp"
                    </a>
                </div>

                <div class="contact-sidebar col-span-12 lg:col-span-4">
                    <div class="grid grid-cols-1 gap-3">
                        {lines.into_iter().map(contact_card).collect_view()}
                    </div>
                </div>
            </div>
        </section>
    }
}

fn contact_card(line: ContactLine) -> impl IntoView {
    let ContactLine {
        label,
        value,
        icon,
        href,
    } = line;
    let body = match href {
        Some(href) => view! {
            <a
                href=href
                target="_blank"
                rel="noopener noreferrer"
                class="text-sm hover:underline text-left"
                aria-label=format!("Contact via {label}")
            >
                {value}
            </a>
        }
        .into_any(),
        None => view! { <div class="text-sm">{value}</div> }.into_any(),
    };

    view! {
        <div class="contact-card outlined p-3">
            <div class="flex items-start gap-3">
                <div class="mt-1">
                    <Icon kind=icon />
                </div>
                <div class="flex-1">
                    <div class="text-xs font-mono text-gray-600 mb-1">{label}</div>
                    {body}
                </div>
            </div>
        </div>
    }
}
