use crate::types::{DayBlock, SchedulePlan, TripParameters};

/// Body shared by every fallback block; only the header changes per day.
pub const FALLBACK_BODY: &str = "- Wake up at local morning time even if tired.
- Get natural light exposure within 1 hour of waking.
- Keep naps short (20–30 minutes) before mid-afternoon.
- Avoid caffeine after early afternoon.
- Go to bed at local night time.";

const CALM_TONE: &str = "- Neutral, clinical, supportive tone ONLY.
- No humor, slang, sarcasm, or narrative.";

const SASSY_TONE: &str = "- Be mildly sassy ONLY on Day 0. Never insult the user.
- No slang or narrative.";

/// The header every block for `day` must contain.
pub fn day_marker(day: u32) -> String {
    format!("Day {}:", day)
}

/// Prompt asking for the advice of a single day.
pub fn build_day_prompt(params: &TripParameters, day: u32) -> String {
    let effective_days = params.effective_days();
    let tone = if params.admin_mode && day == 0 {
        SASSY_TONE
    } else {
        CALM_TONE
    };
    let day_kind = if day == 0 {
        "Day 0 is the FLIGHT DAY ONLY.".to_string()
    } else {
        format!("Day {} is a destination day (no flight).", day)
    };

    format!(
        "You are a jet lag recovery assistant.

ABSOLUTE RULES:
{tone}
- No cities, hotels, food, activities, or sightseeing.
- ONLY give advice about sleep, naps, light exposure, hydration, caffeine, meals, and movement.

Day rules:
- {day_kind}

Context:
- User lives in {from} and has not departed yet.
- Destination is {to}.
- Age group: {age}
- Flight class: {class}

Variables snapshot (DO NOT ignore):
- From timezone: {from}
- To timezone: {to}
- Day index: {day}
- Total recovery days: {effective_days}
- Age group: {age}
- Flight class: {class}
- Admin mode: {admin}

TASK:
Generate advice for **Day {day} only**.
Output EXACTLY this format:

Day {day}:
- 3 to 6 short bullet points focused on coping with jet lag.
",
        from = params.origin_timezone,
        to = params.destination_timezone,
        age = params.age_group,
        class = params.flight_class,
        admin = params.admin_mode,
    )
}

/// One prompt asking for the whole plan at once.
pub fn build_plan_prompt(params: &TripParameters) -> String {
    let effective_days = params.effective_days();
    let tone = if params.admin_mode {
        "- Be mildly sassy ONLY on Day 0. Never insult the user."
    } else {
        "- Calm, neutral, supportive."
    };

    format!(
        "You are a jet lag assistant.

STRICT RULES (MANDATORY):
- Day 0 = flight day ONLY (exactly one day).
- Days 1 through Day {effective_days} = destination days.
- You MUST output EXACTLY {sections} sections.
- Each day MUST be labeled explicitly as \"Day X\".
- If ANY day is missing, the answer is invalid.
- NEVER invent cabins, lounges, hotels, entertainment, sightseeing, or events.
- ONLY give advice about sleep, naps, light exposure, hydration, caffeine, meals, and movement.

Residence rule:
- The user currently lives in {from} and has NOT departed yet.
- The destination is {to}.

Flight behavior by class:
- Economy: limited sleep, hydration reminders.
- Premium economy: slightly better rest.
- Business/First: proper sleep blocks, still realistic.

Trip details:
- Trip length: {effective_days} days
- Age group: {age}
- Flight class: {class}

Admin mode: {admin}

Tone rules:
{tone}

Output format:
Day X:
- Short, practical coping advice only
- Focus on how to manage fatigue and sleep timing
- No locations, no activities, no travel narrative
",
        sections = effective_days + 1,
        from = params.origin_timezone,
        to = params.destination_timezone,
        age = params.age_group,
        class = params.flight_class,
        admin = params.admin_mode,
    )
}

/// Byte offset and day number of every `Day N:` header in `text`, in order.
fn day_headers(text: &str) -> Vec<(usize, u32)> {
    let mut headers = Vec::new();

    for (start, prefix) in text.match_indices("Day ") {
        let rest = &text[start + prefix.len()..];
        let digits = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 || rest.as_bytes().get(digits) != Some(&b':') {
            continue;
        }
        if let Ok(day) = rest[..digits].parse::<u32>() {
            headers.push((start, day));
        }
    }

    headers
}

/// Accept a reply only if it is non-empty and carries the day marker.
///
/// The accepted text starts at the first `Day {day}:` header and stops at
/// the next `Day N:` header, so a reply never contributes another day's block.
pub fn validate_block(response: &str, day: u32) -> Option<String> {
    let headers = day_headers(response);
    let index = headers.iter().position(|&(_, found)| found == day)?;
    let start = headers[index].0;
    let end = headers
        .get(index + 1)
        .map_or(response.len(), |&(offset, _)| offset);

    let section = response[start..end].trim();
    (!section.is_empty()).then(|| section.to_string())
}

/// Canned advice for a day whose reply was rejected.
pub fn fallback_block(day: u32) -> String {
    format!("{}\n{}", day_marker(day), FALLBACK_BODY)
}

/// Join blocks in order, one blank line apart.
pub fn render_blocks(blocks: &[DayBlock]) -> String {
    blocks
        .iter()
        .map(|block| block.text.trim())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Split a whole-plan reply into Day 0..=N in ascending order.
///
/// Each day takes its first section from the reply; missing days, Day 0
/// included, get the fallback block. Sections for days past N are dropped.
pub fn assemble_plan(raw: &str, effective_days: u32) -> SchedulePlan {
    let mut plan = SchedulePlan::new();

    for day in 0..=effective_days {
        let block = match validate_block(raw, day) {
            Some(text) => DayBlock::generated(day, text),
            None => DayBlock::fallback(day, fallback_block(day)),
        };
        plan.push(block);
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AgeGroup, FlightClass};

    fn params() -> TripParameters {
        TripParameters {
            origin_timezone: "Asia/Bangkok".to_string(),
            destination_timezone: "Europe/London".to_string(),
            age_group: AgeGroup::Adult,
            trip_length_days: 10,
            flight_class: FlightClass::Business,
            admin_mode: false,
        }
    }

    #[test]
    fn test_day_prompt_restates_parameters() {
        let prompt = build_day_prompt(&params(), 2);

        assert!(prompt.contains("- From timezone: Asia/Bangkok"));
        assert!(prompt.contains("- To timezone: Europe/London"));
        assert!(prompt.contains("- Day index: 2"));
        assert!(prompt.contains("- Total recovery days: 3"));
        assert!(prompt.contains("- Age group: adult"));
        assert!(prompt.contains("- Flight class: business"));
        assert!(prompt.contains("Day 2 is a destination day"));
        assert!(prompt.contains("\nDay 2:\n- 3 to 6 short bullet points"));
    }

    #[test]
    fn test_flight_day_prompt() {
        let prompt = build_day_prompt(&params(), 0);
        assert!(prompt.contains("Day 0 is the FLIGHT DAY ONLY."));
        assert!(!prompt.contains("destination day (no flight)"));
    }

    #[test]
    fn test_admin_tone_only_on_flight_day() {
        let mut admin = params();
        admin.age_group = AgeGroup::Kid;
        admin.admin_mode = true;

        assert!(build_day_prompt(&admin, 0).contains("mildly sassy"));
        assert!(!build_day_prompt(&admin, 1).contains("mildly sassy"));
        assert!(!build_day_prompt(&params(), 0).contains("mildly sassy"));
    }

    #[test]
    fn test_plan_prompt_section_count() {
        let mut short = params();
        short.trip_length_days = 2;
        let prompt = build_plan_prompt(&short);
        assert!(prompt.contains("You MUST output EXACTLY 3 sections."));
        assert!(prompt.contains("Days 1 through Day 2 = destination days."));
    }

    #[test]
    fn test_validate_block() {
        assert_eq!(
            validate_block("  Day 1:\n- Nap  \n", 1).as_deref(),
            Some("Day 1:\n- Nap")
        );
        assert!(validate_block("", 1).is_none());
        assert!(validate_block("   \n", 1).is_none());
        assert!(validate_block("Day 2:\n- Nap", 1).is_none());
        assert!(validate_block("Day 1\n- missing colon", 1).is_none());
    }

    #[test]
    fn test_fallback_body_is_shared() {
        let zero = fallback_block(0);
        let three = fallback_block(3);
        assert!(zero.starts_with("Day 0:\n"));
        assert!(three.starts_with("Day 3:\n"));
        assert_eq!(zero.strip_prefix("Day 0:"), three.strip_prefix("Day 3:"));
        assert_eq!(FALLBACK_BODY.lines().count(), 5);
    }

    #[test]
    fn test_validate_block_stops_at_next_header() {
        let reply = "Sure!\nDay 1:\n- Nap early\n\nDay 2:\n- Walk\nDay 1:\n- Again";
        assert_eq!(
            validate_block(reply, 1).as_deref(),
            Some("Day 1:\n- Nap early")
        );
        assert_eq!(validate_block(reply, 2).as_deref(), Some("Day 2:\n- Walk"));
        assert!(validate_block("Day 10:\n- Late", 1).is_none());
    }

    #[test]
    fn test_assemble_plan_reorders_and_fills_gaps() {
        let raw = "Day 2:\n- Walk\n\nDay 0:\n- Hydrate\n\nDay 5:\n- Extra";
        let plan = assemble_plan(raw, 3);

        assert_eq!(plan.days(), vec![0, 1, 2, 3]);
        assert_eq!(plan.block(0).unwrap().text, "Day 0:\n- Hydrate");
        assert_eq!(plan.block(2).unwrap().text, "Day 2:\n- Walk");
        assert_eq!(plan.block(1).unwrap().text, fallback_block(1));
        assert_eq!(plan.block(3).unwrap().text, fallback_block(3));
        assert!(!plan.render().contains("Day 5:"));
    }

    #[test]
    fn test_assemble_plan_without_markers_keeps_flight_day() {
        let plan = assemble_plan("Sure, here you go", 1);

        assert_eq!(plan.days(), vec![0, 1]);
        assert_eq!(plan.fallback_count(), 2);
        assert!(plan.render().starts_with("Day 0:\n"));
    }
}
