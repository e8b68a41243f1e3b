use super::*;

fn render<V: RenderHtml>(view: impl FnOnce() -> V) -> String {
    let owner = Owner::new();
    owner.set();
    view().to_html()
}

#[test]
fn dashboard_renders_heading_inside_main() {
    let html = render(|| view! { <DashboardPage/> });
    assert_eq!(html, "<main><h1>Dashboard</h1><!></main>");
}

#[test]
fn user_logger_renders_only_a_placeholder() {
    let html = render(|| view! { <UserLogger/> });
    assert_eq!(html, "<!>");
}
