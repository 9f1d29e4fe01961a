use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use parlor_core::{REDIRECT_PARAM, config::AuthConfig};
use parlor_ui::{AuthPanel, PostAuthRedirect};

/// Which provider flow a page fronts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    SignIn,
    SignUp,
}

#[component]
pub fn SignInPage() -> impl IntoView {
    view! { <AuthPage flow=Flow::SignIn /> }
}

#[component]
pub fn SignUpPage() -> impl IntoView {
    view! { <AuthPage flow=Flow::SignUp /> }
}

/// Provider flow entry plus the post-authentication redirect.
#[component]
fn AuthPage(flow: Flow) -> impl IntoView {
    let auth = use_context::<AuthConfig>().unwrap_or_default();

    // Captured once; later query changes do not retarget the redirect.
    let redirect_url = use_query_map()
        .with_untracked(|query| query.get(REDIRECT_PARAM).map(|value| value.to_string()));

    let (title, flow_url, action_label) = match flow {
        Flow::SignIn => ("Welcome back", auth.hosted_sign_in_url.clone(), "Sign in"),
        Flow::SignUp => ("Create your account", auth.hosted_sign_up_url.clone(), "Sign up"),
    };

    view! {
      <AuthPanel
        title=title.to_string()
        flow_url=flow_url
        action_label=action_label.to_string()
      />
      <PostAuthRedirect issue_token_path=auth.issue_token_path redirect_url=redirect_url />
    }
}
