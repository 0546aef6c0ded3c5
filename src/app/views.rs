//! Server-rendered pages.

use chrono::{DateTime, Utc};

use crate::flash::Flash;
use crate::model::{Url, UrlCheck, UrlSummary};
use crate::normalize::ValidationError;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn index_page(
    flash: Option<Flash>,
    submitted: &str,
    error: Option<&ValidationError>,
) -> String {
    let (input_class, feedback) = match error {
        Some(err) => (
            "form-control form-control-lg is-invalid",
            format!(
                "\n          <div class=\"invalid-feedback\">{}</div>",
                html_escape(&err.to_string())
            ),
        ),
        None => ("form-control form-control-lg", String::new()),
    };

    let body = format!(
        r#"<div class="row">
  <div class="col-12 col-md-10 col-lg-8 mx-auto">
    <h1 class="display-3">Анализатор страниц</h1>
    <p class="lead">Бесплатно проверяйте сайты на SEO пригодность</p>
    <form action="/urls" method="post" class="row">
      <div class="col-8">
        <input type="text" name="url[name]" value="{value}" class="{input_class}" placeholder="https://www.example.com" aria-label="url">{feedback}
      </div>
      <div class="col-2">
        <input type="submit" class="btn btn-primary btn-lg ms-3 px-5 text-uppercase mx-3" value="Проверить">
      </div>
    </form>
  </div>
</div>"#,
        value = html_escape(submitted),
    );

    layout("Анализатор страниц", flash, &body)
}

pub fn urls_page(flash: Option<Flash>, urls: &[UrlSummary]) -> String {
    let mut rows = String::new();
    for url in urls {
        rows.push_str(&format!(
            "        <tr>\n          <td>{id}</td>\n          <td><a href=\"/urls/{id}\">{name}</a></td>\n          <td>{checked}</td>\n          <td>{status}</td>\n        </tr>\n",
            id = url.id,
            name = html_escape(&url.name),
            checked = format_time(url.latest_check_at),
            status = format_status(url.latest_status_code),
        ));
    }

    let body = format!(
        r#"<h1>Сайты</h1>
<div class="table-responsive">
  <table class="table table-bordered table-hover text-nowrap" data-test="urls">
    <thead>
      <tr>
        <th>ID</th>
        <th>Имя</th>
        <th>Последняя проверка</th>
        <th>Код ответа</th>
      </tr>
    </thead>
    <tbody>
{rows}    </tbody>
  </table>
</div>"#
    );

    layout("Сайты", flash, &body)
}

pub fn url_page(flash: Option<Flash>, url: &Url, checks: &[UrlCheck]) -> String {
    let mut rows = String::new();
    for check in checks {
        rows.push_str(&format!(
            "        <tr>\n          <td>{id}</td>\n          <td>{status}</td>\n          <td class=\"text-break\">{h1}</td>\n          <td class=\"text-break\">{title}</td>\n          <td class=\"text-break\">{description}</td>\n          <td>{created_at}</td>\n        </tr>\n",
            id = check.id,
            status = format_status(check.status_code),
            h1 = html_escape(check.h1.as_deref().unwrap_or_default()),
            title = html_escape(check.title.as_deref().unwrap_or_default()),
            description = html_escape(check.description.as_deref().unwrap_or_default()),
            created_at = format_time(Some(check.created_at)),
        ));
    }

    let body = format!(
        r#"<h1>Сайт: {name}</h1>
<div class="table-responsive">
  <table class="table table-bordered table-hover text-nowrap" data-test="url">
    <tbody>
      <tr><td>ID</td><td>{id}</td></tr>
      <tr><td>Имя</td><td>{name}</td></tr>
      <tr><td>Дата создания</td><td>{created_at}</td></tr>
    </tbody>
  </table>
</div>
<h2 class="mt-5 mb-3">Проверки</h2>
<form method="post" action="/urls/{id}/checks">
  <input type="submit" class="btn btn-primary" value="Запустить проверку">
</form>
<table class="table table-bordered table-hover mt-3" data-test="checks">
  <thead>
    <tr>
      <th>ID</th>
      <th>Код ответа</th>
      <th>h1</th>
      <th>title</th>
      <th>description</th>
      <th>Дата создания</th>
    </tr>
  </thead>
  <tbody>
{rows}  </tbody>
</table>"#,
        id = url.id,
        name = html_escape(&url.name),
        created_at = format_time(Some(url.created_at)),
    );

    layout(&url.name, flash, &body)
}

fn layout(title: &str, flash: Option<Flash>, body: &str) -> String {
    let alert = flash
        .map(|flash| {
            format!(
                "\n  <div class=\"alert alert-{}\" role=\"alert\">{}</div>",
                flash.kind().alert_class(),
                html_escape(flash.message())
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!doctype html>
<html lang="ru">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css" rel="stylesheet">
</head>
<body class="min-vh-100 d-flex flex-column">
<header class="flex-shrink-0">
  <nav class="navbar navbar-expand-md navbar-dark bg-dark px-3">
    <a class="navbar-brand" href="/">Анализатор страниц</a>
    <ul class="navbar-nav">
      <li class="nav-item"><a class="nav-link" href="/">Главная</a></li>
      <li class="nav-item"><a class="nav-link" href="/urls">Сайты</a></li>
    </ul>
  </nav>
</header>{alert}
<main class="flex-grow-1">
  <div class="container-lg mt-3">
{body}
  </div>
</main>
</body>
</html>
"#,
        title = html_escape(title),
    )
}

fn format_time(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|at| at.format(TIME_FORMAT).to_string())
        .unwrap_or_default()
}

fn format_status(value: Option<i64>) -> String {
    value.map(|code| code.to_string()).unwrap_or_default()
}

fn html_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
