use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{Handler, HandlerContext, OPEN_VERB, PICK_VERB, re, report};
use crate::command::Command;
use crate::selector::{DomSearch, Target, TargetKind};

static MEMBER_BY_NAME: Lazy<Regex> = Lazy::new(|| {
    re(r"(?i)^(?:click|check|select|toggle|mark)\s+(?:on\s+)?(?:the\s+)?(?:member|manager)\s+(?:named|called|with\s+name)\s+(.+)$")
});
static ROW_TYPE: Lazy<Regex> = Lazy::new(|| {
    re(r"(?i)^(?:set|make|change)\s+(?:row|member|person|entry)\s+(\d+)\s+(?:to|as)\s+(?:a\s+)?(member|manager)$")
});
static ADD_MEMBER: Lazy<Regex> = Lazy::new(|| {
    re(r"(?i)^(?:click|press|add|create)(?:\s+on)?(?:\s+the)?(?:\s+new)?(?:\s+add)?\s+(?:member\s+or\s+manager|member|manager)(?:\s+button)?$")
});
static ADD_ORGANIZER: Lazy<Regex> = Lazy::new(|| {
    re(r"(?i)^(?:(?:click|press)(?:\s+on)?(?:\s+the)?\s+)?add\s+(?:an?\s+|new\s+)?organizer(?:\s+button)?$")
});
static ORGANIZER_DROPDOWN: Lazy<Regex> =
    Lazy::new(|| re(&format!(r"(?i)^{}\s+organizer(?:\s+dropdown)?$", OPEN_VERB)));
static PICK_ORGANIZER: Lazy<Regex> = Lazy::new(|| {
    re(&format!(r"(?i)^{}\s+(.+?)\s+as\s+(?:the\s+)?organizer$", PICK_VERB))
});

fn organizer_dropdown() -> Target {
    Target::of_kind(TargetKind::OrganizerDropdown)
        .with_dom_search(DomSearch::open_dropdown("Organizer", &["organizer"], None))
}

/// Member/manager table and the organizer section.
pub struct MemberManagerHandler;

impl MemberManagerHandler {
    async fn set_row_type(&self, row: usize, kind: &str, ctx: &HandlerContext<'_>) -> bool {
        let engine = ctx.engine;
        if row == 0 {
            engine.speak("Row numbers start at 1").await;
            return true;
        }

        let label = if kind.eq_ignore_ascii_case("manager") { "Manager" } else { "Member" };

        if !engine.run_dom_search(&DomSearch::member_type_dropdown(row - 1)).await {
            let target = Target::of_kind(TargetKind::MemberManagerDropdown);
            engine.speak(&format!("Could not find {} for row {}", target.description, row)).await;
            return true;
        }

        let result = engine.choose_option(label).await;
        report(ctx, result, &format!("Set row {} to {}", row, label)).await
    }
}

#[async_trait]
impl Handler for MemberManagerHandler {
    fn name(&self) -> &str {
        "member_manager"
    }

    async fn handle(&self, command: &Command, ctx: &HandlerContext<'_>) -> bool {
        let text = command.text.trim();
        let engine = ctx.engine;

        if let Some(caps) = MEMBER_BY_NAME.captures(text) {
            let name = caps[1].trim();
            engine.speak(&format!("Looking for {}...", name)).await;
            if engine.run_dom_search(&DomSearch::member_row(name)).await {
                engine.speak(&format!("Selected member {}", name)).await;
            } else {
                engine.speak(&format!("Could not find member {}", name)).await;
            }
            return true;
        }

        if let Some(caps) = ROW_TYPE.captures(text) {
            let row = caps[1].parse::<usize>().unwrap_or(0);
            return self.set_row_type(row, &caps[2], ctx).await;
        }

        if ADD_MEMBER.is_match(text) {
            let target = Target::of_kind(TargetKind::AddMemberManagerButton)
                .with_dom_search(DomSearch::click_by_text("Add Member Or Manager"));
            let result = engine.click(&target).await;
            return report(ctx, result, "Clicked Add Member Or Manager").await;
        }

        if ADD_ORGANIZER.is_match(text) {
            let target = Target::of_kind(TargetKind::AddOrganizerButton)
                .with_dom_search(DomSearch::click_by_text("Add Organizer"));
            let result = engine.click(&target).await;
            return report(ctx, result, "Clicked Add Organizer").await;
        }

        if ORGANIZER_DROPDOWN.is_match(text) {
            let result = engine.click(&organizer_dropdown()).await;
            return report(ctx, result, "Opened the organizer dropdown").await;
        }

        if let Some(caps) = PICK_ORGANIZER.captures(text) {
            let name = caps[1].trim();
            let result = engine.select_from_dropdown(&organizer_dropdown(), name, true).await;
            return report(ctx, result, &format!("Selected {} as organizer", name)).await;
        }

        false
    }
}
