use axum::response::Html;

/// Minimal browser front-end for the augmentation endpoint: checkboxes
/// per transformation, a multi-file input and a download of the
/// returned archive.
pub async fn form() -> Html<&'static str> {
  Html(FORM_PAGE)
}

const FORM_PAGE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>Image Augmentation</title>
<style>
  body { font-family: sans-serif; max-width: 40em; margin: 2em auto; color: #333; }
  h1 { color: #4A90E2; }
  label { display: block; font-size: 18px; margin: 0.3em 0; }
  input[type=file] { border: 2px dashed #4A90E2; padding: 20px; width: 100%; margin: 1em 0; }
  button { background: #4A90E2; color: white; font-size: 20px; border: none; padding: 15px; width: 100%; cursor: pointer; }
  button:hover { background: #357ABD; }
  #status { margin-top: 1em; color: #B00; }
</style>
</head>
<body>
<h1>Image Augmentation</h1>
<p>Select the augmentations you need.</p>
<form id="augment-form">
  <label><input type="checkbox" name="rotate" checked> Rotate</label>
  <label><input type="checkbox" name="horizontal_flip" checked> Horizontal Flip</label>
  <label><input type="checkbox" name="vertical_flip" checked> Vertical Flip</label>
  <label><input type="checkbox" name="brightness_contrast" checked> Random Brightness/Contrast</label>
  <label><input type="checkbox" name="zoom" checked> Zoom</label>
  <label><input type="checkbox" name="grayscale"> Grayscale</label>
  <input type="file" name="images" accept=".jpg,.jpeg,.png" multiple>
  <button type="submit">Download Augmented Images as ZIP</button>
</form>
<p id="status"></p>
<script>
document.getElementById('augment-form').addEventListener('submit', async (event) => {
  event.preventDefault();
  const form = event.target;
  const status = document.getElementById('status');
  status.textContent = '';

  const selection = {};
  for (const box of form.querySelectorAll('input[type=checkbox]')) {
    selection[box.name] = box.checked;
  }

  const body = new FormData();
  body.append('selection', JSON.stringify(selection));
  for (const file of form.querySelector('input[type=file]').files) {
    body.append('images', file, file.name);
  }

  const response = await fetch('/api/v1/augment', { method: 'POST', body });
  if (!response.ok) {
    status.textContent = await response.text();
    return;
  }

  const url = URL.createObjectURL(await response.blob());
  const link = document.createElement('a');
  link.href = url;
  link.download = 'augmented_images.zip';
  link.click();
  URL.revokeObjectURL(url);
});
</script>
</body>
</html>
"#;
