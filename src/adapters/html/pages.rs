//! Page bodies.

use crate::domain::gym::{ClassSession, Member, Payment};

use super::layout::{html_escape, render_layout, PageContext};

/// Previously entered member form values.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemberFormValues<'a> {
    pub first_name: &'a str,
    pub paternal_surname: &'a str,
    pub email: &'a str,
    pub membership_type: &'a str,
}

pub fn login_page(ctx: &PageContext<'_>) -> String {
    let body = r#"        <h1>Iniciar sesión</h1>
        <form method="post" action="/login">
            <label for="username">Usuario</label>
            <input id="username" name="username" type="text" required autofocus>
            <label for="password">Contraseña</label>
            <input id="password" name="password" type="password" required>
            <button type="submit">Entrar</button>
        </form>"#;
    render_layout("Iniciar sesión", ctx, body)
}

pub fn dashboard_page(ctx: &PageContext<'_>) -> String {
    let role = ctx.role.or(ctx.username).unwrap_or_default();
    let body = format!(
        r#"        <h1>Panel del gimnasio</h1>
        <p>Sesión iniciada con el rol <strong>{role}</strong>.</p>
        <p>Lo que puedes ver y modificar depende de los permisos de tu rol en la base de datos.</p>
        <ul>
            <li><a href="/miembros">Miembros</a></li>
            <li><a href="/clases">Clases</a></li>
            <li><a href="/pagos">Pagos</a></li>
            <li><a href="/miembro/nuevo">Agregar miembro</a></li>
        </ul>"#,
        role = html_escape(role)
    );
    render_layout("Inicio", ctx, &body)
}

pub fn members_page(ctx: &PageContext<'_>, members: &[Member]) -> String {
    let mut body = String::from("        <h1>Miembros</h1>\n");
    body.push_str("        <p><a href=\"/miembro/nuevo\">Agregar miembro</a></p>\n");
    if members.is_empty() {
        body.push_str("        <p>No hay miembros registrados.</p>");
        return render_layout("Miembros", ctx, &body);
    }

    body.push_str(&table_head(&["ID", "Nombre", "Correo", "Membresía"]));
    for member in members {
        body.push_str(&table_row(&[
            &member.id.to_string(),
            &member.full_name,
            &member.email,
            &member.membership_type,
        ]));
    }
    body.push_str(TABLE_END);
    render_layout("Miembros", ctx, &body)
}

pub fn classes_page(ctx: &PageContext<'_>, classes: &[ClassSession]) -> String {
    let mut body = String::from("        <h1>Clases</h1>\n");
    if classes.is_empty() {
        body.push_str("        <p>No hay clases programadas.</p>");
        return render_layout("Clases", ctx, &body);
    }

    body.push_str(&table_head(&["Clase", "Horario", "Instructor"]));
    for class in classes {
        body.push_str(&table_row(&[&class.name, &class.schedule, &class.instructor]));
    }
    body.push_str(TABLE_END);
    render_layout("Clases", ctx, &body)
}

pub fn payments_page(ctx: &PageContext<'_>, payments: &[Payment]) -> String {
    let mut body = String::from("        <h1>Pagos</h1>\n");
    if payments.is_empty() {
        body.push_str("        <p>No hay pagos registrados.</p>");
        return render_layout("Pagos", ctx, &body);
    }

    body.push_str(&table_head(&["Miembro", "Monto", "Fecha", "Método"]));
    for payment in payments {
        body.push_str(&table_row(&[
            &payment.member_name,
            &payment.amount,
            &payment
                .paid_on
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            &payment.method,
        ]));
    }
    body.push_str(TABLE_END);
    render_layout("Pagos", ctx, &body)
}

pub fn new_member_page(ctx: &PageContext<'_>, values: &MemberFormValues<'_>) -> String {
    let mut body = String::from(
        "        <h1>Agregar miembro</h1>\n        <form method=\"post\" action=\"/miembro/nuevo\">\n",
    );
    for (name, label, kind, value) in [
        ("nombre", "Nombre", "text", values.first_name),
        ("apellido_paterno", "Apellido paterno", "text", values.paternal_surname),
        ("correo", "Correo", "email", values.email),
        ("tipo_membresia", "Tipo de membresía", "text", values.membership_type),
    ] {
        body.push_str(&format!(
            "            <label for=\"{name}\">{label}</label>\n            <input id=\"{name}\" name=\"{name}\" type=\"{kind}\" value=\"{value}\" required>\n",
            value = html_escape(value)
        ));
    }
    body.push_str("            <button type=\"submit\">Guardar</button>\n        </form>");
    render_layout("Agregar miembro", ctx, &body)
}

const TABLE_END: &str = "            </tbody>\n        </table>";

fn table_head(columns: &[&str]) -> String {
    let mut out = String::from("        <table>\n            <thead>\n                <tr>");
    for column in columns {
        out.push_str(&format!("<th>{}</th>", column));
    }
    out.push_str("</tr>\n            </thead>\n            <tbody>\n");
    out
}

fn table_row(cells: &[&str]) -> String {
    let mut out = String::from("                <tr>");
    for cell in cells {
        out.push_str(&format!("<td>{}</td>", html_escape(cell)));
    }
    out.push_str("</tr>\n");
    out
}
