use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde_json::json;

const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>QR Code Generator</title>
</head>
<body>
  <h1>QR Code Generator</h1>
  <form action="/scan" method="post">
    <label for="url">URL</label>
    <input type="text" id="url" name="url" placeholder="https://example.com" autofocus>
    <button type="submit">Generate</button>
  </form>
</body>
</html>
"#;

const SCAN_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>QR Code for {{url}}</title>
</head>
<body>
  <h1>Your QR Code</h1>
  <img src="{{{src}}}" alt="QR code for {{url}}">
  <p><a href="{{url}}">{{url}}</a></p>
  <a href="{{{src}}}" download="qrcode.svg">Download</a>
  <a href="/">Generate another</a>
</body>
</html>
"#;

const SUCCESS_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Success</title>
</head>
<body>
  <h1>Success!</h1>
  <a href="/">Back to the generator</a>
</body>
</html>
"#;

/// Renders the HTML pages served by the form endpoints
#[derive(Debug, Clone)]
pub struct PageRenderer {
    handlebars: Handlebars<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);

        handlebars
            .register_template_string("index", INDEX_TEMPLATE)
            .context("Failed to register index template")?;
        handlebars
            .register_template_string("scan", SCAN_TEMPLATE)
            .context("Failed to register scan template")?;
        handlebars
            .register_template_string("success", SUCCESS_TEMPLATE)
            .context("Failed to register success template")?;

        Ok(Self { handlebars })
    }

    pub fn render_index(&self) -> Result<String> {
        self.handlebars
            .render("index", &json!({}))
            .context("Failed to render index page")
    }

    /// Page showing the QR image `src` (a data URL) for `url`
    ///
    /// `url` is HTML-escaped; `src` is emitted as-is since it is generated.
    pub fn render_scan(&self, src: &str, url: &str) -> Result<String> {
        self.handlebars
            .render("scan", &json!({ "src": src, "url": url }))
            .context("Failed to render scan page")
    }

    pub fn render_success(&self) -> Result<String> {
        self.handlebars
            .render("success", &json!({}))
            .context("Failed to render success page")
    }
}
