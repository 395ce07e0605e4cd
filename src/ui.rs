use crate::render::svg::escape;
use crate::session::{Notice, NoticeKind};
use crate::words::PRESELECTED_WORDS;

pub struct AdminView {
    pub total: usize,
    pub cloud_svg: Option<String>,
    pub histogram_svg: Option<String>,
    pub saved_files: Vec<String>,
}

pub struct PageView<'a> {
    pub notice: Option<Notice>,
    pub has_participated: bool,
    pub admin_denied: bool,
    pub admin: Option<AdminView>,
    pub public_url: &'a str,
    pub refresh_secs: Option<u64>,
}

pub fn render_index(view: &PageView<'_>) -> String {
    let refresh = match (&view.admin, view.refresh_secs) {
        (Some(_), Some(secs)) => format!(r#"<meta http-equiv="refresh" content="{secs}" />"#),
        _ => String::new(),
    };

    fill_template(
        INDEX_HTML,
        &[
            ("REFRESH", refresh),
            ("PUBLIC_URL", escape(view.public_url)),
            ("NOTICE", render_notice(view.notice.as_ref())),
            ("OPTIONS", render_options()),
            ("PARTICIPATION", participation_hint(view).to_string()),
            ("ADMIN_FORM", render_admin_form(view)),
            ("ADMIN", render_admin(view)),
        ],
    )
}

/// Replaces each `{{KEY}}` in a single pass. Substituted values are never rescanned.
fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let value = after.find("}}").and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (value, end))
        });
        match value {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn render_notice(notice: Option<&Notice>) -> String {
    let Some(notice) = notice else {
        return String::new();
    };
    let kind = match notice.kind {
        NoticeKind::Success => "ok",
        NoticeKind::Warning => "warn",
    };
    format!(
        r#"<div class="notice" data-type="{kind}">{}</div>"#,
        escape(&notice.message)
    )
}

fn render_options() -> String {
    PRESELECTED_WORDS
        .iter()
        .map(|word| {
            let word = escape(word);
            format!(r#"<option value="{word}">{word}</option>"#)
        })
        .collect()
}

fn participation_hint(view: &PageView<'_>) -> &'static str {
    if view.has_participated && view.admin.is_none() {
        r#"<p class="hint">Votre mot a bien été enregistré. Merci de votre participation !</p>"#
    } else {
        ""
    }
}

fn render_admin_form(view: &PageView<'_>) -> String {
    if view.admin.is_some() {
        return String::from(
            r#"<form method="post" action="/admin">
          <input type="hidden" name="code" value="" />
          <button class="btn-quiet" type="submit">Quitter le mode administrateur</button>
        </form>"#,
        );
    }

    let denied = if view.admin_denied {
        r#"<p class="hint">Code incorrect.</p>"#
    } else {
        ""
    };
    format!(
        r#"<form method="post" action="/admin" class="admin-login">
          <label for="code">Entrez le code administrateur :</label>
          <input id="code" name="code" type="password" autocomplete="off" />
          <button class="btn-quiet" type="submit">Valider</button>
        </form>
        {denied}"#
    )
}

fn render_admin(view: &PageView<'_>) -> String {
    let Some(admin) = &view.admin else {
        return String::new();
    };

    let charts = match (&admin.cloud_svg, &admin.histogram_svg) {
        (Some(cloud), Some(histogram)) => format!(
            r#"<div class="charts">
          <div class="chart-card wide"><h3>Nuage de mots</h3>{cloud}</div>
          <div class="chart-card"><h3>Histogramme des mots</h3>{histogram}</div>
        </div>"#
        ),
        _ => String::from(
            r#"<p class="hint">Le nuage de mots et l'histogramme apparaîtront ici lorsque les participants auront soumis leurs mots.</p>"#,
        ),
    };

    let history = if admin.saved_files.is_empty() {
        String::from(r#"<p class="hint">Aucune image sauvegardée pour le moment.</p>"#)
    } else {
        admin
            .saved_files
            .iter()
            .map(|file| {
                let file = escape(file);
                format!(
                    r#"<figure><img src="/archives/{file}" alt="{file}" /><figcaption>{file}</figcaption></figure>"#
                )
            })
            .collect()
    };

    format!(
        r#"<section class="admin">
      <div class="admin-header">
        <h2>Nuage de mots en direct</h2>
        <span class="count">{total} vote(s)</span>
      </div>
      {charts}
      <div class="actions">
        <a class="btn-quiet" href="/">Rafraîchir la page</a>
        <form method="post" action="/reset">
          <button class="btn-reset" type="submit">Réinitialiser</button>
        </form>
      </div>
      <h3>Historique des images sauvegardées</h3>
      <div class="history">{history}</div>
    </section>"#,
        total = admin.total,
    )
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="fr">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  {{REFRESH}}
  <title>Nuage de mots en direct</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1080px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Georgia", serif;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .subtitle,
    .hint {
      margin: 0;
      color: #6f6a65;
    }

    .top {
      display: grid;
      grid-template-columns: auto 1fr;
      gap: 28px;
      align-items: center;
    }

    .qr img {
      width: 200px;
      height: 200px;
      display: block;
    }

    .qr figcaption {
      font-size: 0.85rem;
      color: #8b857d;
      text-align: center;
    }

    form {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: center;
    }

    select,
    input {
      font-size: 1rem;
      padding: 10px 14px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
    }

    button,
    .btn-quiet {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      text-decoration: none;
    }

    .btn-submit {
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.3);
    }

    .btn-quiet {
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
    }

    .btn-reset {
      background: var(--accent-2);
      color: white;
    }

    .notice {
      padding: 14px 18px;
      border-radius: 14px;
      background: white;
    }

    .notice[data-type="ok"] {
      color: #2d7a4b;
      border: 1px solid rgba(45, 122, 75, 0.3);
    }

    .notice[data-type="warn"] {
      color: #a8661b;
      border: 1px solid rgba(168, 102, 27, 0.3);
    }

    .admin-header {
      display: flex;
      justify-content: space-between;
      align-items: baseline;
    }

    .charts {
      display: grid;
      grid-template-columns: 2fr 1fr;
      gap: 16px;
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .chart-card h3 {
      margin-top: 0;
    }

    .actions {
      display: flex;
      gap: 16px;
      margin: 16px 0;
    }

    .history {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
      gap: 12px;
    }

    .history img {
      width: 100%;
      border-radius: 8px;
    }

    .history figcaption {
      font-size: 0.75rem;
      word-break: break-all;
    }

    @media (max-width: 700px) {
      .top,
      .charts {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Nuage de mots en direct</h1>
      <p class="subtitle">Scannez le QR Code ci-dessous pour accéder au nuage de mots</p>
    </header>

    {{NOTICE}}

    <section class="top">
      <figure class="qr">
        <img src="/qr.svg" alt="{{PUBLIC_URL}}" />
        <figcaption>Scannez et entrez vos mots</figcaption>
      </figure>
      <div>
        <h2>Partagez un mot pour décrire ce que vous pensez des crèches</h2>
        <form method="post" action="/submit">
          <label for="word">Choisissez un mot dans la liste</label>
          <select id="word" name="word">{{OPTIONS}}</select>
          <button class="btn-submit" type="submit">Soumettre</button>
        </form>
        {{PARTICIPATION}}
      </div>
    </section>

    <section>
      <h2>Authentification administrateur</h2>
      {{ADMIN_FORM}}
    </section>

    {{ADMIN}}
  </main>
</body>
</html>
"#;
