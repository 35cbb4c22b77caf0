//! Header Component
//!
//! Sticky site header: brand, inline links and account controls on desktop,
//! a slide-over menu on mobile. Every click is turned into a `NavEvent`.

use careerhub::nav::{
    CtaDescriptor, Icon, LinkCatalog, LinkEntry, LinkTarget, NavEnvironment, NavEvent, NavView,
    NavigationMachine, VisualWeight,
};
use leptos::*;
use leptos_router::*;
use std::rc::Rc;

use crate::api;
use crate::dom::{self, DomAnchors, DomScrollLock};
use crate::state::{NavHandle, SessionRequests};

/// Site header
#[component]
pub fn Header() -> impl IntoView {
    let location = use_location();
    let navigate = use_navigate();

    let machine = NavigationMachine::mount(
        Rc::new(LinkCatalog::default()),
        location.pathname.get_untracked(),
        NavEnvironment::new(Rc::new(DomAnchors), Rc::new(DomScrollLock)),
    );
    let handle = NavHandle::new(
        machine,
        Rc::new(move |path: &str| navigate(path, NavigateOptions::default())),
    );
    handle.dispatch(NavEvent::ViewportResized {
        width: dom::viewport_width(),
    });

    // Route signal: close the menu on every completed navigation and
    // refresh the session, which may have changed across a login redirect
    {
        let handle = handle.clone();
        let requests = SessionRequests::default();
        create_effect(move |_| {
            let path = location.pathname.get();
            handle.dispatch(NavEvent::RouteChanged(path));

            let handle = handle.clone();
            let requests = requests.clone();
            let ticket = requests.begin();
            spawn_local(async move {
                let status = api::fetch_session_status().await;
                // An older reply must not overwrite a newer one
                if requests.is_latest(ticket) {
                    handle.dispatch(NavEvent::SessionChanged(status));
                }
            });
        });
    }

    let resize = {
        let handle = handle.clone();
        window_event_listener(ev::resize, move |_| {
            handle.dispatch(NavEvent::ViewportResized {
                width: dom::viewport_width(),
            });
        })
    };

    let escape = {
        let handle = handle.clone();
        window_event_listener(ev::keydown, move |ev| {
            if ev.key() == "Escape" {
                handle.dispatch(NavEvent::CloseMenu);
            }
        })
    };

    {
        let handle = handle.clone();
        on_cleanup(move || {
            resize.remove();
            escape.remove();
            handle.release();
        });
    }

    let nav_view = handle.view();
    let desktop_links = {
        let handle = handle.clone();
        move || render_links(&handle, &nav_view.get(), false)
    };
    let desktop_ctas = {
        let handle = handle.clone();
        move || render_ctas(&handle, nav_view.get().ctas, false)
    };
    let mobile_menu = {
        let handle = handle.clone();
        move || {
            let snapshot = nav_view.get();
            snapshot
                .is_open
                .then(|| render_mobile_menu(&handle, &snapshot))
        }
    };
    let toggle = move |_: ev::MouseEvent| handle.dispatch(NavEvent::ToggleMenu);

    view! {
        <header class="sticky top-0 z-50 h-16 glassmorphic border-b">
            <nav class="max-w-7xl mx-auto h-16 px-4 flex items-center justify-between">
                // Brand
                <A href="/" class="flex items-center gap-2">
                    <div class="w-8 h-8 rounded-lg bg-foreground/20 flex items-center justify-center font-bold">
                        "C"
                    </div>
                    <span class="font-bold hidden sm:block">"CareerHub"</span>
                </A>

                // Desktop links
                <div class="hidden md:flex gap-2">{desktop_links}</div>

                // Desktop account controls
                <div class="hidden md:flex items-center gap-3">{desktop_ctas}</div>

                // Mobile toggle
                <button
                    class="md:hidden p-2 rounded-lg hover:bg-foreground/10"
                    aria-label="Toggle Menu"
                    aria-controls="mobile-menu"
                    aria-expanded=move || nav_view.get().is_open.to_string()
                    on:click=toggle
                >
                    "☰"
                </button>

                {mobile_menu}
            </nav>
        </header>
    }
}

/// Slide-over panel shown while the menu is open
fn render_mobile_menu(handle: &NavHandle, snapshot: &NavView) -> View {
    let backdrop = handle.clone();
    let close = handle.clone();

    view! {
        <div
            class="fixed inset-0 z-40 bg-black/40 md:hidden"
            on:click=move |_| backdrop.dispatch(NavEvent::CloseMenu)
        />
        <aside
            id="mobile-menu"
            role="dialog"
            aria-modal="true"
            aria-label="Navigation"
            class="fixed right-0 top-0 z-50 h-full w-[320px] sm:w-[400px] flex flex-col bg-background shadow-xl md:hidden"
        >
            <div class="flex items-center justify-between p-4">
                <div>
                    <p class="text-xl font-bold">"CareerHub"</p>
                    <p class="text-xs text-muted-foreground">"Your career companion"</p>
                </div>
                <button
                    class="p-2 rounded-lg hover:bg-foreground/10"
                    aria-label="Close Menu"
                    on:click=move |_| close.dispatch(NavEvent::CloseMenu)
                >
                    "✕"
                </button>
            </div>

            <div class="flex-1 overflow-y-auto space-y-6 py-4">
                <div class="space-y-1">
                    <p class="px-4 text-xs font-semibold uppercase tracking-wider mb-3">"Navigation"</p>
                    {render_links(handle, snapshot, true)}
                </div>
                <div class="space-y-3 px-2">
                    <p class="px-2 text-xs font-semibold uppercase tracking-wider">"Account"</p>
                    {render_ctas(handle, snapshot.ctas, true)}
                </div>
            </div>
        </aside>
    }
    .into_view()
}

fn render_links(handle: &NavHandle, snapshot: &NavView, mobile: bool) -> View {
    let class = if mobile {
        "group w-full rounded-xl px-4 py-3.5 text-base font-medium flex items-center gap-3 text-foreground/70 hover:text-foreground hover:bg-primary/10"
    } else {
        "relative px-4 py-2 text-foreground/80 hover:text-foreground transition"
    };
    let show_icons = mobile && snapshot.show_icons;

    snapshot
        .links
        .iter()
        .cloned()
        .map(|entry| {
            let handle = handle.clone();
            let href = link_href(&entry);
            let name = entry.name.clone();
            let icon = entry.icon.filter(|_| show_icons).map(icon_glyph);

            view! {
                <a
                    href=href
                    class=class
                    on:click=move |ev| {
                        ev.prevent_default();
                        handle.dispatch(NavEvent::ActivateLink(entry.clone()));
                    }
                >
                    {icon}
                    {name}
                </a>
            }
        })
        .collect_view()
}

fn render_ctas(handle: &NavHandle, ctas: &'static [CtaDescriptor], mobile: bool) -> View {
    ctas.iter()
        .map(|cta| {
            let cta = *cta;
            let handle = handle.clone();
            let class = cta_class(cta.weight, mobile);

            view! {
                <a
                    href=cta.route
                    class=class
                    on:click=move |ev| {
                        ev.prevent_default();
                        handle.dispatch(NavEvent::ActivateCta(cta));
                    }
                >
                    {icon_glyph(cta.icon)}
                    " "
                    {cta.label}
                </a>
            }
        })
        .collect_view()
}

/// `href` for a link, so middle-click and copy-link keep working
fn link_href(entry: &LinkEntry) -> String {
    match &entry.target {
        LinkTarget::Route(path) => path.clone(),
        LinkTarget::Anchor(id) => format!("/#{}", id),
    }
}

fn cta_class(weight: VisualWeight, mobile: bool) -> String {
    let width = if mobile { "w-full justify-center" } else { "" };
    let look = match weight {
        VisualWeight::Primary => "glassmorphic-button-primary shadow-lg hover:shadow-xl",
        VisualWeight::Secondary => "border border-input bg-background hover:bg-accent",
    };
    format!(
        "inline-flex items-center gap-2 rounded-md px-4 py-2 text-sm font-medium {} {}",
        look, width
    )
    .trim_end()
    .to_string()
}

fn icon_glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Briefcase => "💼",
        Icon::Building2 => "🏢",
        Icon::Bookmark => "🔖",
        Icon::GraduationCap => "🎓",
        Icon::Award => "🏆",
        Icon::CreditCard => "💳",
        Icon::Sparkles => "✨",
        Icon::User => "👤",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_href() {
        assert_eq!(link_href(&LinkEntry::route("Browse", "/browse")), "/browse");
        assert_eq!(link_href(&LinkEntry::anchor("Plans", "pricing")), "/#pricing");
    }

    #[test]
    fn test_cta_class_by_weight() {
        assert!(cta_class(VisualWeight::Primary, false).contains("glassmorphic-button-primary"));
        assert!(cta_class(VisualWeight::Secondary, true).ends_with("w-full justify-center"));
        assert!(!cta_class(VisualWeight::Secondary, false).ends_with(' '));
    }
}
