/// Page shell. Replace `{min_count}`, `{max_count}`, `{default_count}`, `{empty_warning}` and `{model}`.
pub const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>AI Content Generator</title>
<style>
    body {
        background-color: #0e1117;
        color: #f5f5f5;
        font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
        margin: 0 auto;
        max-width: 1100px;
        padding: 32px;
    }
    .big-font {
        font-size: 30px;
        font-weight: bold;
        color: #f5f5f5;
    }
    .recommend-box {
        background-color: #1e1e1e;
        padding: 20px;
        border-radius: 12px;
        margin-bottom: 20px;
        border: 1px solid #333;
        box-shadow: 0 0 10px rgba(0,0,0,0.4);
        color: #f5f5f5;
    }
    textarea {
        background-color: #1e1e1e;
        color: white;
        width: 100%;
        height: 120px;
        border: 1px solid #333;
        border-radius: 8px;
        padding: 8px;
    }
    button {
        margin-top: 16px;
        padding: 8px 16px;
        border-radius: 8px;
        border: 1px solid #555;
        background-color: #262730;
        color: #f5f5f5;
        cursor: pointer;
    }
    .notice { padding: 12px; border-radius: 8px; margin: 16px 0; }
    .notice.warning { background-color: #3d3a1e; }
    .notice.error { background-color: #3e1e1e; }
    [hidden] { display: none !important; }
</style>
</head>
<body>
<div class="big-font">🤖 AI-Powered Personalized Content Generator</div>

<h3>🧑‍💬 Tell us your interests</h3>
<label for="interests">Enter your preferences (e.g., AI, productivity, travel, etc.):</label>
<textarea id="interests"></textarea>

<label for="count">How many content pieces would you like? <span id="count-value">{default_count}</span></label>
<input id="count" type="range" min="{min_count}" max="{max_count}" value="{default_count}">

<div><button id="generate">✨ Generate AI-Powered Content</button></div>

<p id="spinner" hidden>Generating with {model}...</p>
<div id="notice" class="notice" hidden></div>

<h3 id="results-heading" hidden>📌 Recommended Titles &amp; Generated Content</h3>
<div id="results"></div>

<script>
    const interests = document.getElementById("interests");
    const count = document.getElementById("count");
    const button = document.getElementById("generate");
    const spinner = document.getElementById("spinner");
    const notice = document.getElementById("notice");
    const heading = document.getElementById("results-heading");
    const results = document.getElementById("results");

    count.addEventListener("input", () => {
        document.getElementById("count-value").textContent = count.value;
    });

    function showNotice(kind, message) {
        notice.className = "notice " + kind;
        notice.textContent = message;
        notice.hidden = false;
    }

    function finish(source) {
        source.close();
        spinner.hidden = true;
        button.disabled = false;
    }

    button.addEventListener("click", () => {
        notice.hidden = true;
        results.innerHTML = "";
        heading.hidden = true;

        if (!interests.value.trim()) {
            showNotice("warning", "{empty_warning}");
            return;
        }

        button.disabled = true;
        spinner.hidden = false;

        const params = new URLSearchParams({ interests: interests.value, count: count.value });
        const source = new EventSource("/api/v1/generate/stream?" + params.toString());

        source.addEventListener("block", (event) => {
            heading.hidden = false;
            results.insertAdjacentHTML("beforeend", JSON.parse(event.data).html);
        });
        source.addEventListener("warning", (event) => {
            showNotice("warning", JSON.parse(event.data).message);
            finish(source);
        });
        source.addEventListener("error", (event) => {
            if (event.data) {
                showNotice("error", "❌ " + JSON.parse(event.data).message);
            }
            finish(source);
        });
        source.addEventListener("done", () => finish(source));
    });
</script>
</body>
</html>
"#;
