//! Control page served at `/`

/// Duration fields default to 10 seconds, the repeat interval to 30 seconds.
pub const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Rounded Timer</title>
<style>
  body { font-family: sans-serif; text-align: center; }
  form { margin: 8px; }
  input[type=text] { width: 3em; }
</style>
</head>
<body>
<form id="controls">
  <label>Min <input type="text" name="minutes" value="0"></label>
  <label>Sec <input type="text" name="seconds" value="10"></label>
  <button type="button" data-action="start">Start</button>
  <button type="button" data-action="stop">Stop</button>
  <button type="button" data-action="reset">Reset</button>
  <div>
    <label><input type="checkbox" name="repeat"> Repeat every</label>
    <label>Min <input type="text" name="repeat_minutes" value="0"></label>
    <label>Sec <input type="text" name="repeat_seconds" value="30"></label>
  </div>
</form>
<img id="dial" src="/dial.svg" alt="timer dial">
<script>
  const form = document.getElementById("controls");
  const dial = document.getElementById("dial");

  form.addEventListener("click", async (event) => {
    const action = event.target.dataset.action;
    if (!action) return;
    const body = action === "start" ? new URLSearchParams(new FormData(form)) : undefined;
    const response = await fetch("/" + action, { method: "POST", body });
    if (!response.ok) {
      const reply = await response.json().catch(() => ({}));
      alert(reply.message || "Request failed");
    }
  });

  setInterval(() => { dial.src = "/dial.svg?t=" + Date.now(); }, 100);
</script>
</body>
</html>
"#;
