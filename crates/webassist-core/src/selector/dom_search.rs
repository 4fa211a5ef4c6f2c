//! Tier 4: imperative DOM search run inside the page.
//!
//! Each search is a JavaScript function expression plus its arguments. It
//! performs the action itself and returns `true` (or `{success: true}`)
//! when it found something to act on.

use serde_json::{Value, json};

/// A DOM-search fallback ready to hand to `PageDriver::evaluate`.
#[derive(Debug, Clone, PartialEq)]
pub struct DomSearch {
    /// Short name for logs.
    pub name: &'static str,
    pub script: &'static str,
    pub args: Vec<Value>,
}

/// Interpret a DOM-search return value.
pub fn search_succeeded(result: &Value) -> bool {
    match result {
        Value::Bool(found) => *found,
        Value::Object(map) => map.get("success").and_then(Value::as_bool).unwrap_or(false),
        _ => false,
    }
}

impl DomSearch {
    fn new(name: &'static str, script: &'static str, args: Vec<Value>) -> Self {
        Self { name, script, args }
    }

    /// Open a PrimeNG-style dropdown by element id, label text or
    /// placeholder text, falling back to the dropdown at `position` among
    /// all dropdowns on the page.
    pub fn open_dropdown(id: &str, labels: &[&str], position: Option<usize>) -> Self {
        Self::new(
            "open_dropdown",
            OPEN_DROPDOWN,
            vec![json!(id), json!(labels), json!(position)],
        )
    }

    /// Click the open dropdown's item whose text contains `text`.
    pub fn dropdown_item(text: &str) -> Self {
        Self::new("dropdown_item", DROPDOWN_ITEM, vec![json!(text)])
    }

    /// Type into the open dropdown's filter input.
    pub fn dropdown_filter(text: &str) -> Self {
        Self::new("dropdown_filter", DROPDOWN_FILTER, vec![json!(text)])
    }

    pub fn tab(name: &str) -> Self {
        Self::new("tab", TAB, vec![json!(name)])
    }

    pub fn login_link() -> Self {
        Self::new("login_link", LOGIN_LINK, Vec::new())
    }

    /// Tick the product card whose name matches any of `patterns`.
    pub fn product_checkbox(patterns: &[String]) -> Self {
        Self::new("product_checkbox", PRODUCT_CHECKBOX, vec![json!(patterns)])
    }

    pub fn all_product_checkboxes() -> Self {
        Self::new("all_product_checkboxes", ALL_PRODUCT_CHECKBOXES, Vec::new())
    }

    /// Tick the member table row whose name cell contains `name`.
    pub fn member_row(name: &str) -> Self {
        Self::new("member_row", MEMBER_ROW, vec![json!(name)])
    }

    /// Open the member/manager dropdown of a zero-based table row.
    pub fn member_type_dropdown(row: usize) -> Self {
        Self::new("member_type_dropdown", MEMBER_TYPE_DROPDOWN, vec![json!(row)])
    }

    /// Fill the input best matching `purpose` by label, name, id,
    /// placeholder or aria-label.
    pub fn fill_by_purpose(purpose: &str, value: &str) -> Self {
        Self::new("fill_by_purpose", FILL_BY_PURPOSE, vec![json!(purpose), json!(value)])
    }

    /// Click the smallest visible clickable element whose text contains
    /// `text`.
    pub fn click_by_text(text: &str) -> Self {
        Self::new("click_by_text", CLICK_BY_TEXT, vec![json!(text)])
    }
}

const OPEN_DROPDOWN: &str = r#"(id, labels, position) => {
    const visible = el => !!(el.offsetWidth || el.offsetHeight || el.getClientRects().length);
    if (id) {
        const byId = document.getElementById(id);
        if (byId && visible(byId)) { byId.click(); return true; }
    }
    const wanted = labels.map(l => l.toLowerCase());
    for (const label of document.querySelectorAll('label')) {
        const text = label.textContent.trim().toLowerCase();
        if (wanted.some(w => text.includes(w))) {
            const field = label.closest('.field') || label.parentElement;
            const dropdown = field && field.querySelector('.p-dropdown, select, [role="combobox"]');
            if (dropdown && visible(dropdown)) { dropdown.click(); return true; }
        }
    }
    const dropdowns = Array.from(document.querySelectorAll('.p-dropdown, [role="combobox"]')).filter(visible);
    for (const dropdown of dropdowns) {
        const text = dropdown.textContent.toLowerCase();
        if (wanted.some(w => text.includes(w))) { dropdown.click(); return true; }
    }
    if (position !== null && position < dropdowns.length) {
        dropdowns[position].click();
        return true;
    }
    return false;
}"#;

const DROPDOWN_ITEM: &str = r#"(text) => {
    const wanted = text.toLowerCase();
    const items = Array.from(document.querySelectorAll(
        '.p-dropdown-item, li[role="option"], .p-dropdown-items li, option'));
    const exact = items.find(el => el.textContent.trim().toLowerCase() === wanted);
    const item = exact || items.find(el => el.textContent.toLowerCase().includes(wanted));
    if (!item) return false;
    if (item.tagName === 'OPTION') {
        item.selected = true;
        item.parentElement.dispatchEvent(new Event('change', { bubbles: true }));
    } else {
        item.scrollIntoView({ block: 'center' });
        item.click();
    }
    return true;
}"#;

const DROPDOWN_FILTER: &str = r#"(text) => {
    const inputs = Array.from(document.querySelectorAll(
        'input.p-dropdown-filter, .p-dropdown-panel input, input.p-inputtext'));
    const input = inputs.find(el => el.offsetParent !== null) || inputs[0];
    if (!input) return false;
    input.focus();
    input.value = text;
    input.dispatchEvent(new Event('input', { bubbles: true }));
    input.dispatchEvent(new Event('keyup', { bubbles: true }));
    input.dispatchEvent(new Event('change', { bubbles: true }));
    return true;
}"#;

const TAB: &str = r#"(name) => {
    const wanted = name.toLowerCase();
    const shown = el => {
        const style = window.getComputedStyle(el);
        return style.display !== 'none' && style.visibility !== 'hidden';
    };
    const tabs = Array.from(document.querySelectorAll('[role="tab"], .nav-item, .tab, li, a, button'))
        .filter(el => shown(el) && el.textContent.toLowerCase().includes(wanted))
        .sort((a, b) => a.textContent.length - b.textContent.length);
    if (tabs.length > 0) { tabs[0].click(); return true; }
    const slug = wanted.replace(/\s+/g, '-');
    const byId = document.querySelector(`#${CSS.escape(slug)}-tab, .${CSS.escape(slug)}-tab`);
    if (byId) { byId.click(); return true; }
    return false;
}"#;

const LOGIN_LINK: &str = r#"() => {
    const words = ['log in', 'login', 'sign in', 'signin'];
    const matches = text => words.some(w => text.includes(w));
    for (const link of document.querySelectorAll('a')) {
        const href = (link.getAttribute('href') || '').toLowerCase();
        if (matches(link.textContent.toLowerCase()) || matches(href)) { link.click(); return true; }
    }
    for (const button of document.querySelectorAll('button, [role="button"]')) {
        if (matches(button.textContent.toLowerCase())) { button.click(); return true; }
    }
    const blue = document.querySelector('button.blue-btnnn');
    if (blue) { blue.click(); return true; }
    return false;
}"#;

const PRODUCT_CHECKBOX: &str = r#"(patterns) => {
    const wanted = patterns.map(p => p.toLowerCase());
    for (const card of document.querySelectorAll('.wizard-card-checkbox-container')) {
        const label = card.querySelector('.wizard-card-checkbox-text1');
        const text = (label ? label.textContent : card.textContent).trim().toLowerCase();
        if (!wanted.some(w => text.includes(w))) continue;
        const box = card.querySelector('.p-checkbox, input[type="checkbox"]');
        if (!box) continue;
        const checked = box.classList.contains('p-checkbox-checked') || box.checked === true ||
            !!card.querySelector('.p-checkbox-checked, input:checked');
        if (checked) return { success: true, reason: 'already_checked' };
        box.click();
        return { success: true, reason: 'clicked' };
    }
    for (const label of document.querySelectorAll('label')) {
        const text = label.textContent.trim().toLowerCase();
        if (!wanted.some(w => text.includes(w))) continue;
        const box = label.control || label.parentElement.querySelector('input[type="checkbox"], .p-checkbox');
        if (box) { if (!box.checked) box.click(); return { success: true, reason: 'label' }; }
    }
    return { success: false, reason: 'not_found' };
}"#;

const ALL_PRODUCT_CHECKBOXES: &str = r#"() => {
    let clicked = 0;
    let total = 0;
    for (const card of document.querySelectorAll('.wizard-card-checkbox-container')) {
        const box = card.querySelector('.p-checkbox, input[type="checkbox"]');
        if (!box) continue;
        total += 1;
        const checked = box.classList.contains('p-checkbox-checked') || box.checked === true;
        if (!checked) { box.click(); clicked += 1; }
    }
    return { success: total > 0, clicked, total };
}"#;

const MEMBER_ROW: &str = r#"(name) => {
    const wanted = name.toLowerCase();
    const rows = document.querySelectorAll('.p-datatable-tbody > tr');
    for (let i = 0; i < rows.length; i++) {
        const cell = rows[i].querySelector('td:nth-child(3)') || rows[i];
        if (!cell.textContent.trim().toLowerCase().includes(wanted)) continue;
        const box = rows[i].querySelector('td:first-child .p-checkbox, input[type="checkbox"]');
        if (!box) continue;
        if (box.classList.contains('p-checkbox-checked') || box.checked === true) {
            return { success: true, reason: 'already_checked', rowIndex: i };
        }
        box.click();
        return { success: true, reason: 'clicked', rowIndex: i };
    }
    return { success: false, reason: 'not_found' };
}"#;

const MEMBER_TYPE_DROPDOWN: &str = r#"(row) => {
    const rows = document.querySelectorAll('.p-datatable-tbody > tr');
    if (row >= rows.length) return { success: false, reason: 'out_of_bounds' };
    const dropdown = rows[row].querySelector('td:nth-child(2) .p-dropdown, .p-dropdown');
    if (!dropdown) return { success: false, reason: 'no_dropdown' };
    dropdown.click();
    return { success: true, reason: 'opened' };
}"#;

const FILL_BY_PURPOSE: &str = r#"(purpose, value) => {
    const wanted = purpose.toLowerCase();
    const compact = wanted.replace(/[^a-z0-9]/g, '');
    const fields = Array.from(document.querySelectorAll('input, textarea'))
        .filter(el => !['hidden', 'submit', 'button', 'checkbox', 'radio'].includes(el.type));
    const describe = el => [
        el.name, el.id, el.placeholder, el.getAttribute('aria-label'),
        ...(el.labels ? Array.from(el.labels).map(l => l.textContent) : []),
    ].filter(Boolean).join(' ').toLowerCase();
    const target = fields.find(el => describe(el).includes(wanted)) ||
        fields.find(el => describe(el).replace(/[^a-z0-9]/g, '').includes(compact));
    if (!target) return false;
    target.focus();
    const setter = Object.getOwnPropertyDescriptor(Object.getPrototypeOf(target), 'value');
    if (setter && setter.set) { setter.set.call(target, value); } else { target.value = value; }
    target.dispatchEvent(new Event('input', { bubbles: true }));
    target.dispatchEvent(new Event('change', { bubbles: true }));
    target.blur();
    return true;
}"#;

const CLICK_BY_TEXT: &str = r#"(text) => {
    const wanted = text.toLowerCase();
    const visible = el => !!(el.offsetWidth || el.offsetHeight || el.getClientRects().length);
    const clickable = 'button, a, [role="button"], [role="tab"], input[type="submit"], input[type="button"], li, label, span, div';
    const candidates = Array.from(document.querySelectorAll(clickable))
        .filter(el => visible(el))
        .filter(el => (el.textContent || el.value || el.getAttribute('aria-label') || '')
            .toLowerCase().includes(wanted))
        .sort((a, b) => (a.textContent || '').length - (b.textContent || '').length);
    if (candidates.length === 0) return false;
    candidates[0].scrollIntoView({ block: 'center' });
    candidates[0].click();
    return true;
}"#;
