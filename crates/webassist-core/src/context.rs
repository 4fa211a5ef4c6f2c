//! Page context snapshots for the language model.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use webassist_protocols::PageDriver;

/// Cap on captured visible text.
pub const MAX_VISIBLE_TEXT: usize = 4000;
/// Cap on each descriptor list in a capture.
pub const MAX_DESCRIPTORS: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDescriptor {
    pub tag: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub name: String,
    pub placeholder: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonDescriptor {
    pub tag: String,
    pub id: String,
    pub text: String,
    pub class: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropdownDescriptor {
    pub id: String,
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckboxDescriptor {
    pub id: String,
    pub label: String,
    pub checked: bool,
}

/// Snapshot of the page, taken fresh for every planner request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageContext {
    pub title: String,
    pub url: String,
    pub visible_text: String,
    pub input_fields: Vec<FieldDescriptor>,
    pub buttons: Vec<ButtonDescriptor>,
    pub dropdowns: Vec<DropdownDescriptor>,
    pub checkboxes: Vec<CheckboxDescriptor>,
}

const CAPTURE_SCRIPT: &str = r#"(maxText, maxItems) => {
    const visible = el => !!(el.offsetWidth || el.offsetHeight || el.getClientRects().length);
    const labelOf = el => {
        if (el.labels && el.labels.length) return el.labels[0].textContent.trim();
        return el.getAttribute('aria-label') || '';
    };
    const clip = (s, n) => (s || '').replace(/\s+/g, ' ').trim().slice(0, n);
    const all = sel => Array.from(document.querySelectorAll(sel)).filter(visible).slice(0, maxItems);
    return {
        title: document.title,
        url: location.href,
        visible_text: clip(document.body ? document.body.innerText : '', maxText),
        input_fields: all('input:not([type=hidden]):not([type=checkbox]), textarea, select').map(el => ({
            tag: el.tagName.toLowerCase(), type: el.type || '', id: el.id, name: el.name || '',
            placeholder: el.placeholder || '', label: clip(labelOf(el), 80),
        })),
        buttons: all('button, [role=button], input[type=submit], a.btn').map(el => ({
            tag: el.tagName.toLowerCase(), id: el.id, text: clip(el.textContent || el.value, 80),
            class: clip(el.className && el.className.baseVal === undefined ? el.className : '', 80),
        })),
        dropdowns: all('.p-dropdown, [role=combobox]').map(el => {
            const field = el.closest('.field');
            const label = field ? field.querySelector('label') : null;
            return { id: el.id, label: clip(label ? label.textContent : '', 80), text: clip(el.textContent, 80) };
        }),
        checkboxes: all('input[type=checkbox], .p-checkbox').map(el => ({
            id: el.id, label: clip(labelOf(el) || (el.parentElement ? el.parentElement.textContent : ''), 80),
            checked: el.checked === true || el.classList.contains('p-checkbox-checked'),
        })),
    };
}"#;

impl PageContext {
    /// Capture the current page. Failures degrade to whatever URL and title
    /// the driver can still report.
    pub async fn capture(driver: &dyn PageDriver) -> PageContext {
        let captured = driver
            .evaluate(CAPTURE_SCRIPT, vec![json!(MAX_VISIBLE_TEXT), json!(MAX_DESCRIPTORS)])
            .await
            .map_err(|e| e.to_string())
            .and_then(|value| serde_json::from_value::<PageContext>(value).map_err(|e| e.to_string()));

        let mut context = match captured {
            Ok(context) => context,
            Err(e) => {
                debug!("Page context capture failed: {}", e);
                PageContext::default()
            }
        };

        if context.url.is_empty() {
            context.url = driver.url().await.unwrap_or_default();
        }
        if context.title.is_empty() {
            context.title = driver.title().await.unwrap_or_default();
        }
        context.truncate_text(MAX_VISIBLE_TEXT);
        context
    }

    fn truncate_text(&mut self, max: usize) {
        if self.visible_text.chars().count() > max {
            self.visible_text = self.visible_text.chars().take(max).collect();
        }
    }

    /// Bounded text rendering embedded in planner prompts.
    pub fn to_prompt(&self, max_inputs: usize, max_buttons: usize) -> String {
        let mut out = String::new();
        out.push_str(&format!("Title: {}\nURL: {}\n", self.title, self.url));

        out.push_str("\nInput fields:\n");
        for field in self.input_fields.iter().take(max_inputs) {
            out.push_str(&format!(
                "- <{} type=\"{}\" id=\"{}\" name=\"{}\" placeholder=\"{}\"> label: {}\n",
                field.tag, field.kind, field.id, field.name, field.placeholder, field.label
            ));
        }

        out.push_str("\nButtons:\n");
        for button in self.buttons.iter().take(max_buttons) {
            out.push_str(&format!(
                "- <{} id=\"{}\" class=\"{}\"> {}\n",
                button.tag, button.id, button.class, button.text
            ));
        }

        if !self.dropdowns.is_empty() {
            out.push_str("\nDropdowns:\n");
            for dropdown in self.dropdowns.iter().take(max_inputs) {
                out.push_str(&format!(
                    "- id=\"{}\" label: {} current: {}\n",
                    dropdown.id, dropdown.label, dropdown.text
                ));
            }
        }

        if !self.checkboxes.is_empty() {
            out.push_str("\nCheckboxes:\n");
            for checkbox in self.checkboxes.iter().take(max_inputs) {
                out.push_str(&format!(
                    "- id=\"{}\" label: {} checked: {}\n",
                    checkbox.id, checkbox.label, checkbox.checked
                ));
            }
        }

        let text: String = self.visible_text.chars().take(MAX_VISIBLE_TEXT).collect();
        out.push_str(&format!("\nVisible text:\n{}\n", text));
        out
    }
}
