//! Shared page layout: navigation, role header and flash messages.

use crate::domain::session::Flash;

/// Per-request values every page shows.
#[derive(Debug, Default)]
pub struct PageContext<'a> {
    /// Logged-in username; `None` hides the navigation.
    pub username: Option<&'a str>,
    /// Display role label.
    pub role: Option<&'a str>,
    /// Flashes consumed by this render.
    pub flashes: &'a [Flash],
}

/// Escapes text for HTML element content and attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

pub(crate) fn render_layout(title: &str, ctx: &PageContext<'_>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Gimnasio</title>
    <style>
{css}
    </style>
</head>
<body>
{nav}    <main>
{flashes}{body}
    </main>
</body>
</html>"#,
        title = html_escape(title),
        css = DEFAULT_CSS,
        nav = render_nav(ctx),
        flashes = render_flashes(ctx.flashes),
        body = body
    )
}

fn render_nav(ctx: &PageContext<'_>) -> String {
    let Some(username) = ctx.username else {
        return String::new();
    };

    let mut nav = String::from("    <nav>\n");
    for (href, label) in [
        ("/", "Inicio"),
        ("/miembros", "Miembros"),
        ("/clases", "Clases"),
        ("/pagos", "Pagos"),
        ("/miembro/nuevo", "Nuevo miembro"),
    ] {
        nav.push_str(&format!("        <a href=\"{}\">{}</a>\n", href, label));
    }
    nav.push_str(&format!(
        "        <span class=\"session-user\">{} (Rol: {})</span>\n",
        html_escape(username),
        html_escape(ctx.role.unwrap_or(username))
    ));
    nav.push_str("        <a href=\"/logout\">Cerrar sesión</a>\n");
    nav.push_str("    </nav>\n");
    nav
}

fn render_flashes(flashes: &[Flash]) -> String {
    let mut out = String::new();
    for flash in flashes {
        out.push_str(&format!(
            "        <div class=\"flash flash-{}\" role=\"alert\">{}</div>\n",
            flash.level.as_str(),
            html_escape(&flash.message)
        ));
    }
    out
}

const DEFAULT_CSS: &str = r#"
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif;
    color: #1f2937;
    max-width: 960px;
    margin: 0 auto;
    padding: 1.5rem;
}
nav {
    display: flex;
    gap: 1rem;
    align-items: center;
    border-bottom: 1px solid #e5e7eb;
    padding-bottom: 0.75rem;
    margin-bottom: 1rem;
}
nav .session-user {
    margin-left: auto;
    color: #6b7280;
}
table {
    border-collapse: collapse;
    width: 100%;
}
th, td {
    border: 1px solid #e5e7eb;
    padding: 0.5rem 0.75rem;
    text-align: left;
}
th {
    background-color: #f3f4f6;
}
form label {
    display: block;
    margin-top: 0.75rem;
}
.flash {
    padding: 0.75rem 1rem;
    margin-bottom: 1rem;
    border-radius: 4px;
}
.flash-success { background-color: #dcfce7; }
.flash-info { background-color: #dbeafe; }
.flash-danger { background-color: #fee2e2; }
"#;
