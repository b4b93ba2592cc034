use serde_json::{Number, Value};

use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::core::{FillSession, FillState, SubmitOutcome};
use crate::domain::{Displayable, Field, FieldType, NamedEntity};

use super::required_arg;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("fill", "Start filling the current form", "fill", cmd_fill),
        CommandEntry::new(
            "value",
            "Answer a field (prompts when no value is given)",
            "value <field-id> [answer...]",
            cmd_value,
        ),
        CommandEntry::new("next", "Go to the next step", "next", cmd_next),
        CommandEntry::new("prev", "Go to the previous step", "prev", cmd_prev)
            .with_aliases(&["back"]),
        CommandEntry::new("submit", "Validate and submit answers", "submit", cmd_submit),
        CommandEntry::new(
            "submissions",
            "List stored submissions for the current form",
            "submissions",
            cmd_submissions,
        ),
    ]
}

fn cmd_fill(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let schema = context.builder()?.schema().clone();
    let session = FillSession::new(schema, Box::new(context.storage.clone()))
        .with_submitted_by(context.config.submitted_by.clone());
    io::print_success(format!(
        "Filling `{}` ({} step(s)).",
        session.schema().title,
        session.step_count()
    ));
    print_step(&session);
    context.session = Some(session);
    Ok(())
}

fn cmd_value(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "value <field-id> [answer...]";
    let id = required_arg(args, 0, USAGE)?;
    let mode = context.mode;

    let field = context
        .session_mut()?
        .schema()
        .field(id)
        .cloned()
        .ok_or_else(|| CommandError::InvalidArguments(format!("Unknown field `{}`.", id)))?;

    let answer = if args.len() > 1 {
        args[1..].join(" ")
    } else if mode == CliMode::Interactive {
        io::prompt_text(&context.theme, &field.display_label())?
    } else {
        return Err(CommandError::InvalidArguments(format!("Usage: {}", USAGE)));
    };

    let session = context.session_mut()?;
    if !session.set_value(id, parse_answer(&field, &answer)) {
        io::print_warning("The form was already submitted.");
        return Ok(());
    }
    match session.blur(id) {
        Some(message) => io::print_warning(format!("{}: {}", id, message)),
        None => io::print_success(format!("Recorded `{}`.", id)),
    }
    Ok(())
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let session = context.session_mut()?;
    if session.next() {
        print_step(session);
    } else {
        io::print_warning("Already on the last step. Use `submit`.");
    }
    Ok(())
}

fn cmd_prev(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let session = context.session_mut()?;
    if session.previous() {
        print_step(session);
    } else {
        io::print_warning("Already on the first step.");
    }
    Ok(())
}

fn cmd_submit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let session = context.session_mut()?;
    match session.submit()? {
        SubmitOutcome::Submitted(submission) => {
            io::print_success(format!(
                "Submission `{}` accepted with {} answer(s).",
                submission.id,
                submission.data.len()
            ));
        }
        SubmitOutcome::Rejected(errors) => {
            io::print_warning(format!("Submission rejected: {} problem(s).", errors.len()));
            for (field_id, message) in &errors {
                io::print_error(format!("{}: {}", field_id, message));
            }
        }
        SubmitOutcome::NotReady if session.state() == FillState::Submitted => {
            io::print_warning("This form was already submitted.");
        }
        SubmitOutcome::NotReady => {
            io::print_warning("Submit is only available on the last step. Use `next`.");
        }
    }
    Ok(())
}

fn cmd_submissions(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let form_id = context.builder()?.schema().id;
    let submissions = context.storage.list_submissions(form_id)?;
    if submissions.is_empty() {
        io::print_info("No submissions yet.");
        return Ok(());
    }
    output_section("Submissions");
    for submission in submissions {
        io::print_info(format!("  {}", submission.display_label()));
    }
    Ok(())
}

fn print_step(session: &FillSession) {
    let Some(step) = session.current_step() else {
        return;
    };
    let index = match session.state() {
        FillState::Editing(index) => index + 1,
        FillState::Submitted => session.step_count(),
    };
    output_section(format!(
        "Step {}/{}: {}",
        index,
        session.step_count(),
        step.name()
    ));
    for field in session.current_fields() {
        let value = session
            .value(&field.id)
            .map(Value::to_string)
            .unwrap_or_else(|| "-".into());
        io::print_info(format!("  {:<20} {} = {}", field.id, field.display_label(), value));
        if let Some(message) = session.error(&field.id) {
            io::print_error(format!("    {}", message));
        }
    }
}

/// Interprets typed text according to the field type. JSON literals are
/// accepted wherever they parse.
fn parse_answer(field: &Field, text: &str) -> Value {
    let trimmed = text.trim();
    match field.field_type {
        FieldType::Checkbox => Value::Bool(matches!(
            trimmed.to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1" | "on"
        )),
        FieldType::Checklist if trimmed.starts_with('[') => {
            serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.into()))
        }
        FieldType::Checklist => Value::Array(
            trimmed
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| Value::String(item.into()))
                .collect(),
        ),
        FieldType::Number | FieldType::Slider => trimmed
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(trimmed.into())),
        _ => Value::String(trimmed.into()),
    }
}
