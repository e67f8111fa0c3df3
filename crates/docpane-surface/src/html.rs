//! The panel's embedded page: a nested frame pointed at the rendered
//! document, a loading status row, and a "no content" explanatory panel.
//!
//! The page is generated fresh each time a surface is created, with new
//! CSP nonces; no sources are permitted beyond the nonce-tagged inline
//! style/script and `http://localhost:*` frames.

use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

/// Length of a CSP nonce, in alphanumeric characters.
const NONCE_LEN: usize = 32;

/// A fresh random nonce for tagging inline styles/scripts.
pub fn nonce() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

/// The page's Content-Security-Policy.
pub fn content_security_policy(css_nonce: &str, script_nonce: &str) -> String {
    format!(
        "default-src 'none'; style-src 'nonce-{css_nonce}'; \
         script-src 'nonce-{script_nonce}'; frame-src http://localhost:*/"
    )
}

/// Render the full panel page with the given nonces.
pub fn page(css_nonce: &str, script_nonce: &str) -> String {
    let csp = content_security_policy(css_nonce, script_nonce);
    format!(
        r#"<!DOCTYPE html>
<html>

<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta http-equiv="Content-Security-Policy" content="{csp}" />

  <style nonce="{css_nonce}">
    * {{ box-sizing: border-box; }}
    :not(progress) {{ border: none; }}

    body {{
      height: 100vh;
      padding: 0;
      margin: 0;
      overflow: hidden;
    }}

    iframe {{
      height: 100%;
      width: 100%;
    }}

    #status {{
      width: 100%;
      position: fixed;
      bottom: 0;
      display: flex;
      align-items: center;
      gap: 1rem;
      padding: 0.5rem;
    }}

    #no-content {{
      font-size: 1.2em;
      line-height: 1.5;
      height: 100%;
      overflow-y: auto;
      padding: 0.5rem;
    }}

    #progress-bar {{
      flex-grow: 1;
    }}

    progress {{
      width: 100%;
    }}
  </style>
</head>

<body>
  <div id="no-content" style="display: none">
    <h1>No Content Found</h1>
    <p>The built version of the document you are trying to preview could not
       be located. The most likely explanation is that the document is not
       part of your documentation project.</p>
    <h3>Troubleshooting</h3>
    <p>If you are seeing this for a document you know to be part of your
       project, please check the following.</p>
    <ul>
      <li>The correct environment and build command are configured for your
          project.</li>
      <li>Your documentation has been built at least once.</li>
      <li>There are no errors in the renderer's output log.</li>
    </ul>
  </div>
  <div id="status">
    <p>Loading...</p>
    <div id="progress-bar">
      <progress aria-label="Content loading…"></progress>
    </div>
  </div>
  <iframe id="viewer"></iframe>
</body>

<script nonce="{script_nonce}">
  const viewer = document.getElementById("viewer")
  const noContent = document.getElementById("no-content")
  const status = document.getElementById("status")

  // The last content url shown this session, kept so the page can recover
  // after the host backgrounds and later restores the panel.
  let lastUrl = null
  let readyForwarded = false

  // Control messages from the host, delivered over the injected bridge.
  window.docpane.ipc.on("show", (target) => {{
    if (target === "<nothing>") {{
      status.style.display = "none"

      // Only raise the "no content" panel if nothing was ever shown.
      if (!viewer.src) {{
        noContent.style.display = "block"
      }}
    }} else if (target) {{
      status.style.display = "flex"
      noContent.style.display = "none"
      readyForwarded = false
      viewer.src = target
      lastUrl = target
    }}
  }})

  // Restore the previous page when the panel becomes visible again.
  document.addEventListener("visibilitychange", () => {{
    if (document.visibilityState === "visible" && lastUrl && !viewer.src) {{
      viewer.src = lastUrl
    }}
  }})

  // Readiness signals from the page being shown. Only the local renderer
  // origin is trusted; anything else is ignored.
  window.addEventListener("message", (event) => {{
    if (!event.origin.startsWith("http://localhost:")) {{
      return
    }}
    if (event.data && event.data.ready && !readyForwarded) {{
      readyForwarded = true
      status.style.display = "none"
      noContent.style.display = "none"
      window.docpane.ipc.send("ready", true)
    }}
  }})
</script>

</html>
"#
    )
}
