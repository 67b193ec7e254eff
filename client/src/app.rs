//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Meta, MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::auth_provider::AuthProvider;
use crate::components::route_guard::RouteGuard;
use crate::components::site_header::SiteHeader;
use crate::components::toast_host::ToastHost;
use crate::net::api::{API_BASE_META, ApiConfig};
use crate::net::query::QueryCache;
use crate::pages::{
    admin::AdminPage, dashboard::DashboardPage, employer::EmployerPage, home::HomePage,
    jobs::{JobDetailPage, JobsPage},
    login::LoginPage,
    oauth_callback::OAuthCallbackPage,
    register::RegisterPage,
};
use crate::state::Sessions;
use crate::state::session::SessionKind;
use crate::state::toast::ToastState;
use crate::util::guard::Area;

/// HTML shell rendered on the server for SSR + hydration.
///
/// The backend base URL comes from the `ApiConfig` the server provides as
/// context and is handed to the browser through a `<meta>` tag.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    let api_base = use_context::<ApiConfig>().unwrap_or_default().base_url;
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name=API_BASE_META content=api_base/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the shared contexts (API config, both sessions, query cache,
/// toasts), validates sessions, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = use_context::<ApiConfig>().unwrap_or_else(ApiConfig::from_document);
    provide_context(config);
    provide_context(Sessions::new());
    provide_context(RwSignal::new(QueryCache::default()));
    provide_context(RwSignal::new(ToastState::default()));

    view! {
        <Stylesheet id="leptos" href="/pkg/hireboard.css"/>
        <Title text="Hireboard"/>
        <Meta name="description" content="Find jobs and hire talent."/>

        <Router>
            <AuthProvider kind=SessionKind::User>
                <AuthProvider kind=SessionKind::Admin>
                    <SiteHeader/>
                    <main class="page">
                        <Routes fallback=|| view! { <p class="empty-state">"Page not found."</p> }>
                            <Route path=StaticSegment("") view=HomePage/>
                            <Route path=StaticSegment("jobs") view=JobsPage/>
                            <Route path=(StaticSegment("jobs"), ParamSegment("id")) view=JobDetailPage/>
                            <Route path=StaticSegment("login") view=LoginPage/>
                            <Route path=StaticSegment("register") view=RegisterPage/>
                            <Route path=(StaticSegment("auth"), StaticSegment("callback")) view=OAuthCallbackPage/>
                            <Route
                                path=StaticSegment("dashboard")
                                view=|| view! { <RouteGuard area=Area::Dashboard><DashboardPage/></RouteGuard> }
                            />
                            <Route
                                path=StaticSegment("employer")
                                view=|| view! { <RouteGuard area=Area::Employer><EmployerPage/></RouteGuard> }
                            />
                            <Route
                                path=StaticSegment("admin")
                                view=|| view! { <RouteGuard area=Area::Admin><AdminPage/></RouteGuard> }
                            />
                        </Routes>
                    </main>
                </AuthProvider>
            </AuthProvider>
            <ToastHost/>
        </Router>
    }
}
