//! HTML entry page
//!
//! A single self-contained document. The identity is interpolated as escaped
//! text only; the page script talks to the JSON routes.

use campaign_manager_core::{scripts::escape_html, UserId};

/// Title of the entry page
pub const PAGE_TITLE: &str = "Meta Campaign Manager Pro";

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{title}}</title>
<style>
body { font-family: system-ui, sans-serif; margin: 0; background: #f4f6fa; color: #1c1e21; }
header { background: #1877f2; color: #fff; padding: 12px 24px; display: flex; justify-content: space-between; align-items: center; }
main { max-width: 1100px; margin: 0 auto; padding: 16px; }
section { background: #fff; border-radius: 8px; padding: 16px; margin-bottom: 16px; box-shadow: 0 1px 2px rgba(0,0,0,.1); }
table { border-collapse: collapse; width: 100%; font-size: 13px; }
th, td { border-bottom: 1px solid #e4e6eb; padding: 4px 6px; text-align: left; }
textarea { width: 100%; min-height: 90px; }
.campaign-script-box { border: 1px solid #e4e6eb; border-radius: 6px; padding: 8px 12px; margin: 8px 0; }
#status { min-height: 1.2em; color: #1877f2; }
pre { white-space: pre-wrap; }
</style>
</head>
"#;

const BODY: &str = r#"<main>
<p id="status"></p>
<section>
  <h3>Records</h3>
  <select id="kind">
    <option value="campaigns">Campaigns</option>
    <option value="adsets">Ad Sets</option>
    <option value="ads">Ads</option>
  </select>
  <button onclick="loadRecords()">Refresh</button>
  <div id="records"></div>
  <h4>Add / update</h4>
  <textarea id="record-json" placeholder='{"Campaign Name": "Spring Open House", "Clicks": "120"}'></textarea>
  <input id="record-id" placeholder="ID (for update / delete)">
  <button onclick="addRecord()">Add</button>
  <button onclick="updateRecord()">Update</button>
  <button onclick="deleteRecord()">Delete</button>
</section>
<section>
  <h3>CSV import</h3>
  <textarea id="csv" placeholder="Header1,Header2&#10;value1,value2"></textarea>
  <button onclick="importCsv()">Import into selected collection</button>
</section>
<section>
  <h3>KPI analysis</h3>
  <button onclick="analyze()">Analyze</button>
  <button onclick="createTrigger()">Run every hour</button>
  <pre id="analysis"></pre>
</section>
<section>
  <h3>Campaign scripts</h3>
  <button onclick="loadScripts()">Show library</button>
  <div id="scripts"></div>
</section>
<section>
  <h3>AI script generator</h3>
  <input id="campaign-type" placeholder="Campaign type">
  <input id="city" placeholder="City">
  <input id="budget" placeholder="Budget (USD)">
  <input id="agent-name" placeholder="Agent name">
  <button onclick="generate('campaign')">Generate ad script</button>
  <br>
  <input id="video-type" placeholder="Video type">
  <input id="tone" placeholder="Tone">
  <button onclick="generate('video')">Generate video script</button>
  <pre id="generated"></pre>
</section>
</main>
<script>
const $ = (id) => document.getElementById(id);
const kind = () => $("kind").value;
const say = (text) => { $("status").textContent = text; };

async function call(method, url, body) {
  const init = { method, headers: {} };
  if (body !== undefined) {
    init.headers["Content-Type"] = "application/json";
    init.body = JSON.stringify(body);
  }
  const res = await fetch(url, init);
  const type = res.headers.get("content-type") || "";
  const payload = type.includes("json") ? await res.json() : await res.text();
  if (payload && payload.success === false) { say(payload.error); throw new Error(payload.error); }
  if (payload && payload.message) say(payload.message);
  return payload;
}

function renderTable(rows) {
  const table = document.createElement("table");
  if (!rows.length) { table.textContent = "No records."; return table; }
  const columns = [...new Set(rows.flatMap((row) => Object.keys(row)))];
  const head = table.insertRow();
  columns.forEach((c) => { const th = document.createElement("th"); th.textContent = c; head.appendChild(th); });
  rows.forEach((row) => {
    const tr = table.insertRow();
    columns.forEach((c) => { tr.insertCell().textContent = row[c] ?? ""; });
  });
  return table;
}

async function loadRecords() {
  const res = await call("GET", `/api/${kind()}`);
  $("records").replaceChildren(renderTable(res.data));
}

function recordInput() { return JSON.parse($("record-json").value || "{}"); }
function recordId() { return encodeURIComponent($("record-id").value.trim()); }

async function addRecord() { await call("POST", `/api/${kind()}`, recordInput()); await loadRecords(); }
async function updateRecord() { await call("PATCH", `/api/${kind()}/${recordId()}`, recordInput()); await loadRecords(); }
async function deleteRecord() { await call("DELETE", `/api/${kind()}/${recordId()}`); await loadRecords(); }

async function importCsv() {
  await call("POST", "/api/import", { type: kind(), csv: $("csv").value });
  await loadRecords();
}

async function analyze() {
  const res = await call("GET", "/api/analysis");
  $("analysis").textContent = JSON.stringify(res.data, null, 2);
}

async function createTrigger() { await call("POST", "/api/analysis/trigger"); }

async function loadScripts() { $("scripts").innerHTML = await call("GET", "/api/scripts"); }

async function generate(which) {
  const body = which === "campaign"
    ? { kind: "campaign", campaignType: $("campaign-type").value, city: $("city").value, budget: $("budget").value, agentName: $("agent-name").value }
    : { kind: "video", videoType: $("video-type").value, city: $("city").value, agentName: $("agent-name").value, tone: $("tone").value };
  $("generated").textContent = "Generating...";
  const res = await call("POST", "/api/generate", body);
  $("generated").textContent = res.data.text;
}

loadRecords();
</script>
</body>
</html>
"#;

/// Render the entry page for `user`
pub fn render_index(user: &UserId) -> String {
    let mut html = HEAD.replace("{{title}}", PAGE_TITLE);
    html.push_str(&format!(
        "<body>\n<header><strong>{}</strong><span id=\"user-email\">{}</span></header>\n",
        PAGE_TITLE,
        escape_html(user.as_str())
    ));
    html.push_str(BODY);
    html
}
