//! The interactive page, embedded so the binary is self-contained. Upload
//! and paste feed the same generate call; the chat panel talks to the same
//! model with the conversational template.

pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<title>Generador de Casos de Prueba IA</title>
<style>
  body { font-family: system-ui, sans-serif; margin: 0; display: flex; min-height: 100vh; background: #f7f7f9; }
  aside { width: 300px; background: #23272f; color: #eee; padding: 16px; flex-shrink: 0; }
  aside h2 { font-size: 16px; margin-top: 0; }
  aside label { display: block; font-size: 13px; margin: 12px 0 4px; }
  aside input, aside select, aside textarea { width: 100%; box-sizing: border-box; padding: 6px; border-radius: 4px; border: 1px solid #444; background: #2e333d; color: #eee; }
  aside textarea { height: 220px; font-size: 11px; }
  main { flex: 1; padding: 24px; max-width: 960px; }
  h1 { font-size: 22px; }
  .tabs button { padding: 8px 16px; border: none; background: #ddd; cursor: pointer; border-radius: 4px 4px 0 0; }
  .tabs button.active { background: #4CAF50; color: white; }
  .tab-body { background: white; border: 1px solid #ddd; padding: 16px; margin-bottom: 16px; }
  textarea#paste { width: 100%; height: 180px; box-sizing: border-box; }
  button.primary { width: 100%; background-color: #4CAF50; color: white; border: none; padding: 10px; font-size: 15px; border-radius: 4px; cursor: pointer; }
  button.primary:disabled { background: #9e9e9e; }
  table { border-collapse: collapse; width: 100%; font-size: 12px; background: white; }
  th, td { border: 1px solid #ccc; padding: 4px 6px; text-align: left; vertical-align: top; white-space: pre-wrap; }
  th { background: #eee; }
  #status, #errors { font-size: 13px; margin: 8px 0; }
  #errors { color: #c0392b; white-space: pre-wrap; }
  #chat-log { background: white; border: 1px solid #ddd; padding: 12px; height: 240px; overflow-y: auto; font-size: 14px; }
  .msg-user { text-align: right; color: #1a5276; margin: 6px 0; }
  .msg-assistant { text-align: left; color: #222; margin: 6px 0; white-space: pre-wrap; }
  #chat-row { display: flex; gap: 8px; margin-top: 8px; }
  #chat-input { flex: 1; padding: 8px; }
  .pill { display: inline-block; font-size: 12px; padding: 2px 8px; border-radius: 10px; }
  .pill.on { background: #d4efdf; color: #1e8449; }
  .pill.off { background: #eaecee; color: #566573; }
</style>
</head>
<body>
<aside>
  <h2>&#9881; Configuracion</h2>
  <label>Gemini API Key</label>
  <input id="api-key" type="password" placeholder="API Key">
  <label>Modelo</label>
  <select id="model">
    <option>gemini-2.5-flash</option>
    <option>gemini-pro</option>
  </select>
  <label>Creatividad (Temperatura): <span id="temp-value">0.4</span></label>
  <input id="temperature" type="range" min="0" max="1" step="0.1" value="0.4">
  <label>Contexto del chat: <span id="context-pill" class="pill off">sin HU</span></label>
  <button id="clear-context">Limpiar contexto</button>
  <details>
    <summary>Editar prompt del sistema (CSV)</summary>
    <p style="font-size:11px">Manten <code>{hu_texto}</code> donde deba ir la HU.</p>
    <textarea id="custom-prompt"></textarea>
  </details>
</aside>
<main>
  <h1>&#129514; Generador de Casos de Prueba con IA</h1>
  <p>Sube tus Historias de Usuario (HU) o pegalas directamente para generar casos de prueba exhaustivos.</p>

  <div class="tabs">
    <button id="tab-files" class="active">Subir archivos</button>
    <button id="tab-paste">Pegar texto</button>
  </div>
  <div class="tab-body" id="body-files">
    <input id="files" type="file" accept=".txt" multiple>
    <div id="file-count"></div>
  </div>
  <div class="tab-body" id="body-paste" style="display:none">
    <textarea id="paste" placeholder="Como usuario quiero..."></textarea>
  </div>

  <button id="generate" class="primary">Generar casos de prueba</button>
  <div id="status"></div>
  <div id="errors"></div>
  <div id="results"></div>
  <button id="download" class="primary" style="display:none; margin-top:8px">Descargar CSV</button>

  <h2>&#128172; Chat con IA sobre Testing</h2>
  <div id="chat-log"></div>
  <div id="chat-row">
    <input id="chat-input" placeholder="Preguntame sobre la HU, casos de prueba o metodologias QA...">
    <button id="chat-send">Enviar</button>
  </div>
</main>
<script>
const $ = (id) => document.getElementById(id);
let generatedCases = [];

const COLUMNS = ["archivo_hu","id_caso","tipo_prueba","prioridad","Automatizar",
                 "descripcion","precondiciones","pasos","resultado_esperado","criterio"];

function llmConfig() {
  return {
    provider: "Gemini",
    base_url: "https://generativelanguage.googleapis.com/v1beta/models",
    model: $("model").value,
    api_key: $("api-key").value || null,
    max_tokens: null,
    temperature: parseFloat($("temperature").value),
  };
}

$("temperature").oninput = () => { $("temp-value").textContent = $("temperature").value; };
$("tab-files").onclick = () => switchTab(true);
$("tab-paste").onclick = () => switchTab(false);
function switchTab(files) {
  $("tab-files").classList.toggle("active", files);
  $("tab-paste").classList.toggle("active", !files);
  $("body-files").style.display = files ? "" : "none";
  $("body-paste").style.display = files ? "none" : "";
}

$("files").onchange = () => {
  $("file-count").textContent = $("files").files.length + " archivos cargados.";
};

async function collectStories() {
  const stories = [];
  for (const file of $("files").files) {
    stories.push({ name: file.name, content: await file.text() });
  }
  const pasted = $("paste").value.trim();
  if (pasted) stories.push({ name: "Texto Manual", content: pasted });
  return stories;
}

async function refreshContext() {
  const res = await fetch("/api/context");
  const { has_context } = await res.json();
  $("context-pill").textContent = has_context ? "HU cargada" : "sin HU";
  $("context-pill").className = "pill " + (has_context ? "on" : "off");
}

$("clear-context").onclick = async () => {
  await fetch("/api/context/clear", { method: "POST" });
  refreshContext();
};

$("generate").onclick = async () => {
  if (!$("api-key").value) { $("status").textContent = "Ingresa tu API Key en la barra lateral."; return; }
  const stories = await collectStories();
  if (!stories.length) { $("status").textContent = "No hay HUs para procesar. Sube archivos o pega texto."; return; }

  $("generate").disabled = true;
  $("status").textContent = "Procesando " + stories.length + " HU(s)...";
  $("errors").textContent = "";
  try {
    const body = { config: llmConfig(), stories };
    const custom = $("custom-prompt").value.trim();
    if (custom) body.custom_prompt = custom;
    const res = await fetch("/api/generate", {
      method: "POST", headers: { "Content-Type": "application/json" },
      body: JSON.stringify(body),
    });
    if (!res.ok) throw new Error(await res.text());
    const { cases, errors } = await res.json();
    generatedCases = cases;
    $("errors").textContent = errors.join("\n");
    $("status").textContent = cases.length
      ? "Generacion completada: " + cases.length + " casos. El chat ahora tiene contexto de la HU."
      : "No se generaron casos de prueba.";
    renderTable(cases);
    $("download").style.display = cases.length ? "" : "none";
    refreshContext();
  } catch (e) {
    $("status").textContent = "Error: " + e.message;
  } finally {
    $("generate").disabled = false;
  }
};

function renderTable(cases) {
  if (!cases.length) { $("results").innerHTML = ""; return; }
  let html = "<table><tr>" + COLUMNS.map(c => "<th>" + c + "</th>").join("") + "</tr>";
  for (const caso of cases) {
    html += "<tr>" + COLUMNS.map(c => "<td>" + escapeHtml(caso[c] || "") + "</td>").join("") + "</tr>";
  }
  $("results").innerHTML = html + "</table>";
}

function escapeHtml(text) {
  const div = document.createElement("div");
  div.textContent = text;
  return div.innerHTML;
}

$("download").onclick = async () => {
  const res = await fetch("/api/export", {
    method: "POST", headers: { "Content-Type": "application/json" },
    body: JSON.stringify({ cases: generatedCases }),
  });
  const blob = await res.blob();
  const link = document.createElement("a");
  link.href = URL.createObjectURL(blob);
  link.download = "casos_prueba_generados.csv";
  link.click();
  URL.revokeObjectURL(link.href);
};

function appendMessage(role, text) {
  const div = document.createElement("div");
  div.className = role === "user" ? "msg-user" : "msg-assistant";
  div.textContent = text;
  $("chat-log").appendChild(div);
  $("chat-log").scrollTop = $("chat-log").scrollHeight;
}

async function sendChat() {
  const message = $("chat-input").value.trim();
  if (!message) return;
  if (!$("api-key").value) { appendMessage("assistant", "Ingresa tu API Key para chatear."); return; }
  $("chat-input").value = "";
  appendMessage("user", message);
  try {
    const res = await fetch("/api/chat", {
      method: "POST", headers: { "Content-Type": "application/json" },
      body: JSON.stringify({ config: llmConfig(), message }),
    });
    if (!res.ok) throw new Error(await res.text());
    const { reply } = await res.json();
    appendMessage("assistant", reply);
  } catch (e) {
    appendMessage("assistant", "Error: " + e.message);
  }
}

$("chat-send").onclick = sendChat;
$("chat-input").addEventListener("keydown", (e) => { if (e.key === "Enter") sendChat(); });

refreshContext();
</script>
</body>
</html>
"##;
