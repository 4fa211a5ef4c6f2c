//! Tier 1: curated selectors for the known formation site's forms.

use serde::{Deserialize, Serialize};

/// Targets with a curated selector list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Email,
    Password,
    LoginButton,
    LoginLink,
    SearchBox,
    StateDropdown,
    DropdownFilter,
    CountyDropdown,
    EntityTypeDropdown,
    PrincipalAddressDropdown,
    BillingInfoDropdown,
    BusinessPurposeDropdown,
    OrganizerDropdown,
    AddOrganizerButton,
    MemberCheckbox,
    MemberManagerDropdown,
    AddMemberManagerButton,
    Checkbox,
    LlcName,
    AddressLine1,
    AddressLine2,
    City,
    ZipCode,
}

impl TargetKind {
    /// Spoken name, as in "Could not find <label>".
    pub fn label(&self) -> &'static str {
        match self {
            TargetKind::Email => "email field",
            TargetKind::Password => "password field",
            TargetKind::LoginButton => "login button",
            TargetKind::LoginLink => "login link",
            TargetKind::SearchBox => "search box",
            TargetKind::StateDropdown => "state dropdown",
            TargetKind::DropdownFilter => "dropdown filter",
            TargetKind::CountyDropdown => "county dropdown",
            TargetKind::EntityTypeDropdown => "entity type dropdown",
            TargetKind::PrincipalAddressDropdown => "principal address dropdown",
            TargetKind::BillingInfoDropdown => "billing info dropdown",
            TargetKind::BusinessPurposeDropdown => "business purpose dropdown",
            TargetKind::OrganizerDropdown => "organizer dropdown",
            TargetKind::AddOrganizerButton => "add organizer button",
            TargetKind::MemberCheckbox => "member checkbox",
            TargetKind::MemberManagerDropdown => "member or manager dropdown",
            TargetKind::AddMemberManagerButton => "add member or manager button",
            TargetKind::Checkbox => "checkbox",
            TargetKind::LlcName => "LLC name field",
            TargetKind::AddressLine1 => "address line 1 field",
            TargetKind::AddressLine2 => "address line 2 field",
            TargetKind::City => "city field",
            TargetKind::ZipCode => "zip code field",
        }
    }

    /// Recognize a curated target from a free-text description.
    pub fn from_description(description: &str) -> Option<TargetKind> {
        let d = description.to_lowercase();
        let has = |needle: &str| d.contains(needle);

        let kind = if has("add organizer") {
            TargetKind::AddOrganizerButton
        } else if has("organizer") {
            TargetKind::OrganizerDropdown
        } else if has("add member") {
            TargetKind::AddMemberManagerButton
        } else if has("member") && has("dropdown") {
            TargetKind::MemberManagerDropdown
        } else if has("member") && has("checkbox") {
            TargetKind::MemberCheckbox
        } else if has("business purpose") {
            TargetKind::BusinessPurposeDropdown
        } else if has("billing") {
            TargetKind::BillingInfoDropdown
        } else if has("principal address") {
            TargetKind::PrincipalAddressDropdown
        } else if has("entity type") {
            TargetKind::EntityTypeDropdown
        } else if has("county") && has("dropdown") {
            TargetKind::CountyDropdown
        } else if has("state") && has("dropdown") {
            TargetKind::StateDropdown
        } else if has("filter") {
            TargetKind::DropdownFilter
        } else if has("address line 1") || has("address line one") {
            TargetKind::AddressLine1
        } else if has("address line 2") || has("address line two") {
            TargetKind::AddressLine2
        } else if has("zip") || has("postal") {
            TargetKind::ZipCode
        } else if d.trim() == "city" || has("city field") {
            TargetKind::City
        } else if has("llc") {
            TargetKind::LlcName
        } else if has("password") {
            TargetKind::Password
        } else if has("email") || has("username") {
            TargetKind::Email
        } else if has("login link") || has("sign in link") {
            TargetKind::LoginLink
        } else if has("login") || has("log in") || has("sign in") {
            TargetKind::LoginButton
        } else if has("search") {
            TargetKind::SearchBox
        } else if has("checkbox") {
            TargetKind::Checkbox
        } else {
            return None;
        };
        Some(kind)
    }

    /// Curated selectors, most specific first.
    pub fn selectors(&self) -> &'static [&'static str] {
        match self {
            TargetKind::Email => EMAIL,
            TargetKind::Password => PASSWORD,
            TargetKind::LoginButton => LOGIN_BUTTON,
            TargetKind::LoginLink => LOGIN_LINK,
            TargetKind::SearchBox => SEARCH_BOX,
            TargetKind::StateDropdown => STATE_DROPDOWN,
            TargetKind::DropdownFilter => DROPDOWN_FILTER,
            TargetKind::CountyDropdown => COUNTY_DROPDOWN,
            TargetKind::EntityTypeDropdown => ENTITY_TYPE_DROPDOWN,
            TargetKind::PrincipalAddressDropdown => PRINCIPAL_ADDRESS_DROPDOWN,
            TargetKind::BillingInfoDropdown => BILLING_INFO_DROPDOWN,
            TargetKind::BusinessPurposeDropdown => BUSINESS_PURPOSE_DROPDOWN,
            TargetKind::OrganizerDropdown => ORGANIZER_DROPDOWN,
            TargetKind::AddOrganizerButton => ADD_ORGANIZER_BUTTON,
            TargetKind::MemberCheckbox => MEMBER_CHECKBOX,
            TargetKind::MemberManagerDropdown => MEMBER_MANAGER_DROPDOWN,
            TargetKind::AddMemberManagerButton => ADD_MEMBER_MANAGER_BUTTON,
            TargetKind::Checkbox => CHECKBOX,
            TargetKind::LlcName => LLC_NAME,
            TargetKind::AddressLine1 => ADDRESS_LINE_1,
            TargetKind::AddressLine2 => ADDRESS_LINE_2,
            TargetKind::City => CITY,
            TargetKind::ZipCode => ZIP_CODE,
        }
    }
}

const EMAIL: &[&str] = &[
    "#floating_outlined3",
    "input[type=\"email\"]",
    "input[name=\"email\"]",
    "input[id*=\"email\"]",
    "input[placeholder*=\"email\" i]",
    "input[autocomplete=\"email\"]",
    "input[autocomplete=\"username\"]",
    "input[type=\"text\"][name*=\"user\"]",
    "input[id*=\"user\"]",
];

const PASSWORD: &[&str] = &[
    "#floating_outlined15",
    "input[type=\"password\"]",
    "input[name=\"password\"]",
    "input[id*=\"password\"]",
    "input[placeholder*=\"password\" i]",
    "#password",
    "[aria-label*=\"password\" i]",
    "input[autocomplete=\"current-password\"]",
];

const LOGIN_BUTTON: &[&str] = &[
    "#signInButton",
    "#loginBtn",
    "#signinBtn",
    "#login-button",
    "#signin-button",
    "button[type=\"submit\"]",
    "input[type=\"submit\"]",
    "button[name=\"login\"]",
    "button[name=\"signin\"]",
    "button:has-text(\"Login\")",
    "button:has-text(\"Sign in\")",
    "button:has-text(\"Log in\")",
    "a:has-text(\"Login\")",
    "a:has-text(\"Sign in\")",
    ".login-button",
    ".signin-button",
    "[data-testid=\"login-button\"]",
];

const LOGIN_LINK: &[&str] = &[
    "button.blue-btnnn:has-text(\"Login/Register\")",
    "a:has-text(\"Login/Register\")",
    "a:has-text(\"Login\")",
    "a:has-text(\"Sign in\")",
    "button:has-text(\"Login\")",
    "button:has-text(\"Sign in\")",
    "a[href*=\"signin\"]",
    "a[href*=\"login\"]",
];

const SEARCH_BOX: &[&str] = &[
    "input[type=\"search\"]",
    "input[name=\"q\"]",
    "textarea[name=\"q\"]",
    "input[name*=\"search\" i]",
    "input[placeholder*=\"search\" i]",
    "input[aria-label*=\"search\" i]",
    "[role=\"searchbox\"]",
];

const STATE_DROPDOWN: &[&str] = &[
    "#state",
    ".p-dropdown:has-text(\"Select State\")",
    ".p-dropdown-label:has-text(\"Select State\")",
    "div[aria-label=\"State\"]",
    "div[aria-label=\"Select State\"]",
    "div.field:has(label:has-text(\"State of Formation\")) .p-dropdown",
    "div.state-dropdown",
    "[data-testid=\"state-dropdown\"]",
];

const DROPDOWN_FILTER: &[&str] = &[
    "input.p-dropdown-filter",
    ".p-dropdown-panel input",
    ".p-dropdown-filter",
    "input[type=\"text\"][class*=\"dropdown\"]",
];

const COUNTY_DROPDOWN: &[&str] = &[
    "#county",
    ".p-dropdown:has-text(\"Select County\")",
    ".p-dropdown-label:has-text(\"County\")",
    "div.field:has(label:has-text(\"County\")) .p-dropdown",
];

const ENTITY_TYPE_DROPDOWN: &[&str] = &[
    "#entityType",
    ".p-dropdown:has-text(\"Select Entity Type\")",
    ".p-dropdown-label:has-text(\"Entity Type\")",
    "div.field:has(label:has-text(\"Entity Type\")) .p-dropdown",
];

const PRINCIPAL_ADDRESS_DROPDOWN: &[&str] = &[
    ".p-dropdown:has-text(\"Principal Address\")",
    ".p-dropdown-label:has-text(\"Principal Address\")",
    "div.field:has(label:has-text(\"Principal Address\")) .p-dropdown",
];

const BILLING_INFO_DROPDOWN: &[&str] = &[
    "#RA_Billing_Information",
    ".p-dropdown:has-text(\"Select Billing Info\")",
    ".p-dropdown-label:has-text(\"Billing Info\")",
    "div.p-dropdown:has(.p-dropdown-label:has-text(\"Billing Info\"))",
    "span.p-float-label:has(div#RA_Billing_Information)",
    "div.field:has(label:has-text(\"Billing Info\")) .p-dropdown",
];

const BUSINESS_PURPOSE_DROPDOWN: &[&str] = &[
    "#CD_Business_Purpose_Details",
    ".p-dropdown:has-text(\"Business Purpose\")",
    ".p-dropdown-label:has-text(\"Business Purpose\")",
    "div.field:has(label:has-text(\"Business Purpose\")) .p-dropdown",
];

const ORGANIZER_DROPDOWN: &[&str] = &[
    "#Organizer",
    ".p-dropdown:has-text(\"Select Organizer\")",
    ".p-dropdown-label:has-text(\"Organizer\")",
    "div.p-dropdown:has(.p-dropdown-label:has-text(\"Organizer\"))",
    "span.p-float-label:has(div#Organizer)",
    "div.field:has(label:has-text(\"Organizer\")) .p-dropdown",
];

const ADD_ORGANIZER_BUTTON: &[&str] = &[
    "button[aria-label=\"Add Organizer\"]",
    "button:has-text(\"Add Organizer\")",
    ".p-button:has-text(\"Add Organizer\")",
    "button.vstate-button:has-text(\"Add Organizer\")",
    ".p-button:has(.pi-plus):has-text(\"Add Organizer\")",
];

const MEMBER_CHECKBOX: &[&str] = &[
    ".p-datatable-tbody > tr td:first-child .p-checkbox",
    ".srch-cand-checkbox .p-checkbox",
    ".p-datatable-tbody > tr td:first-child",
];

const MEMBER_MANAGER_DROPDOWN: &[&str] = &[
    ".p-datatable-tbody > tr td:nth-child(2) .p-dropdown",
    ".p-dropdown:has(.p-dropdown-label:has-text(\"Member\"))",
    ".p-dropdown:has(.p-dropdown-label:has-text(\"Manager\"))",
];

const ADD_MEMBER_MANAGER_BUTTON: &[&str] = &[
    "button[aria-label=\"Add Member Or Manager\"]",
    "button:has-text(\"Add Member Or Manager\")",
    ".p-button:has-text(\"Add Member Or Manager\")",
    "button.vstate-button:has-text(\"Add Member Or Manager\")",
    ".p-button:has(.pi-plus):has-text(\"Add Member Or Manager\")",
];

const CHECKBOX: &[&str] = &[
    ".p-checkbox",
    ".p-checkbox-box",
    "input[type=\"checkbox\"]",
    "[role=\"checkbox\"]",
    ".form-check-input",
];

const LLC_NAME: &[&str] = &[
    "#CD_LLC_Name",
    "input[name=\"CD_LLC_Name\"]",
    "input[id*=\"llc\" i]",
    "input[name*=\"llc\" i]",
    "input[placeholder*=\"llc\" i]",
    "input.dialog-form-input-field-wizard",
];

const ADDRESS_LINE_1: &[&str] = &[
    "#floating_outlined2100",
    "input[name=\"cityName1\"]",
    "input[aria-label=\"Address Line 1\"]",
    "input[placeholder*=\"Address Line 1\"]",
    "label:has-text(\"Address Line 1\") + input",
    "label:has-text(\"Address Line 1\") ~ input",
];

const ADDRESS_LINE_2: &[&str] = &[
    "#floating_outlined22",
    "input[name=\"cityName2\"]",
    "input[aria-label=\"Address Line 2\"]",
    "input[placeholder*=\"Address Line 2\"]",
    "label:has-text(\"Address Line 2\") + input",
    "label:has-text(\"Address Line 2\") ~ input",
];

const CITY: &[&str] = &[
    "#floating_outlined2401",
    "input[name=\"city\"]",
    "input[aria-label=\"City\"]",
    "input[placeholder*=\"City\"]",
    "label:has-text(\"City\") + input",
    "label:has-text(\"City\") ~ input",
];

const ZIP_CODE: &[&str] = &[
    "#floating_outlined2601",
    "input[name=\"zipCode\"]",
    "input[aria-label=\"Zip Code\"]",
    "input[placeholder*=\"Zip\"]",
    "input[maxlength=\"5\"]",
    "label:has-text(\"Zip\") + input",
    "label:has-text(\"Zip\") ~ input",
];
