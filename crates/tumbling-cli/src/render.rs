use std::fmt::{self, Write};

use tumbling_core::{ElementCatalog, PassId, Points, Routine, RoutineReport};

/// Plain-text score sheet, one line per filled slot. Bad slots carry a `!`.
pub fn render_text<C>(routine: &Routine, report: &RoutineReport, catalog: &C) -> String
where
    C: ElementCatalog + ?Sized,
{
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_text(&mut out, routine, report, catalog);
    out
}

fn write_text<W, C>(out: &mut W, routine: &Routine, report: &RoutineReport, catalog: &C) -> fmt::Result
where
    W: Write,
    C: ElementCatalog + ?Sized,
{
    let meta = &routine.meta;
    let level = meta
        .level
        .map(|tier| format!("{tier:?}"))
        .unwrap_or_else(|| "-".to_string());
    let gender = meta
        .gender
        .map(|gender| format!("{gender:?}"))
        .unwrap_or_else(|| "-".to_string());
    writeln!(out, "Track: {} | Level: {level} | Gender: {gender}", meta.track)?;

    for id in PassId::BOTH {
        let legality = report.legality.pass(id);
        let bonus = report.bonus(id);
        writeln!(out)?;
        writeln!(out, "{id}")?;
        for (index, slot) in routine.pass(id).slots().iter().enumerate() {
            let Some(slot) = slot else {
                continue;
            };
            let symbol = catalog
                .element(slot.element_id.as_str())
                .map(|element| element.symbol.as_str())
                .unwrap_or("?");
            let marker = if legality.is_bad(index) { '!' } else { ' ' };
            let slot_bonus = bonus.per_slot.get(index).copied().unwrap_or(Points::ZERO);
            write!(
                out,
                "{marker} {:>2}. {symbol:<6} {:<22} {:>4.1}",
                index + 1,
                slot.element_id.as_str(),
                slot.value,
            )?;
            if slot_bonus.is_zero() {
                writeln!(out)?;
            } else {
                writeln!(out, "  +{slot_bonus}")?;
            }
        }
        writeln!(
            out,
            "   difficulty {:.1} | bonus {} | total {:.1}",
            report.difficulty[id.index()],
            bonus.sum,
            report.pass_score(id),
        )?;
        for message in &legality.messages {
            writeln!(out, "   ! {message}")?;
        }
    }

    if !report.legality.cross_messages.is_empty() {
        writeln!(out)?;
        for message in &report.legality.cross_messages {
            writeln!(out, "! {message}")?;
        }
    }

    writeln!(out)?;
    let verdict = if report.is_legal { "legal" } else { "NOT LEGAL" };
    writeln!(
        out,
        "Routine {verdict} | difficulty {:.1} | bonus {}",
        report.total_difficulty(),
        report.total_bonus(),
    )
}

#[cfg(test)]
mod tests {
    use super::render_text;
    use tumbling_core::{
        Catalog, Language, Pass, Routine, RoutineMeta, RoutineReport, RuleBook, Slot, Track,
    };

    #[test]
    fn text_marks_bad_slots_and_lists_messages() {
        let catalog = Catalog::standard();
        let meta = RoutineMeta::new(Track::National, None, None);
        let first = Pass::with_slots(
            8,
            vec![
                Some(Slot::new("whip", 0.2)),
                Some(Slot::new("barani", 0.6)),
            ],
        )
        .unwrap();
        let routine = Routine::new(meta, first, Pass::empty(8));
        let report =
            RoutineReport::evaluate(&routine, &catalog, &RuleBook::standard(), Language::English);
        let text = render_text(&routine, &report, &catalog);

        assert!(text.starts_with("Track: National | Level: - | Gender: -"));
        assert!(text.contains("!  1. ^"));
        assert!(text.contains("!  2. b"));
        assert!(text.contains("A whip cannot be followed by a forward element"));
        assert!(text.contains("Routine NOT LEGAL"));
    }

    #[test]
    fn unknown_elements_render_with_placeholder_symbol() {
        let catalog = Catalog::standard();
        let meta = RoutineMeta::new(Track::None, None, None);
        let first = Pass::with_slots(8, vec![Some(Slot::new("mystery", 0.0))]).unwrap();
        let routine = Routine::new(meta, first, Pass::empty(8));
        let report =
            RoutineReport::evaluate(&routine, &catalog, &RuleBook::standard(), Language::English);
        let text = render_text(&routine, &report, &catalog);
        assert!(text.contains("   1. ?"));
        assert!(text.contains("Routine legal"));
    }

    #[test]
    fn only_slots_with_bonus_show_an_amount() {
        let catalog = Catalog::standard();
        let meta = RoutineMeta::new(Track::National, None, None);
        let ids = [
            "round-off",
            "flic-flac",
            "back-tuck",
            "whip",
            "back-pike",
            "back-straight",
        ];
        let first = Pass::with_slots(
            8,
            ids.iter()
                .map(|id| Some(Slot::new(*id, catalog.difficulty(id).unwrap_or(0.0))))
                .collect(),
        )
        .unwrap();
        let routine = Routine::new(meta, first, Pass::empty(8));
        let report =
            RoutineReport::evaluate(&routine, &catalog, &RuleBook::standard(), Language::English);
        let text = render_text(&routine, &report, &catalog);

        let slot_lines: Vec<&str> = text.lines().filter(|line| line.contains(". ")).collect();
        assert_eq!(slot_lines.len(), 6);
        assert!(slot_lines[..5].iter().all(|line| !line.contains('+')));
        assert!(slot_lines[5].ends_with("+0.3"));
    }
}
