use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{self, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::core::{
    services::{DragPayload, LayoutService, ReorderService},
    DropOutcome, FormBuilder,
};
use crate::domain::{
    ConditionOperator, ConditionalRule, Displayable, Field, FieldPatch, FieldType,
    FieldValidation, FormLayout, NamedEntity,
};

use super::{parse_bool, parse_slot, required_arg};

const SET_USAGE: &str = "set <field-id> <label|required|placeholder|options|width|description|step|maxlength|range|rule|color|image> [value...]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "new",
            "Start a new form",
            "new <title> [classic|stepped]",
            cmd_new,
        ),
        CommandEntry::new("open", "Open a saved form", "open <title-or-slug>", cmd_open),
        CommandEntry::new("forms", "List saved forms", "forms", cmd_forms),
        CommandEntry::new(
            "add",
            "Add a field from the palette",
            "add <type> [index|beside:<field-id>] [--id <field-id>]",
            cmd_add,
        ),
        CommandEntry::new(
            "move",
            "Move a field (sections carry their children)",
            "move <field-id> <index|beside:<field-id>>",
            cmd_move,
        ),
        CommandEntry::new("remove", "Remove one field", "remove <field-id>", cmd_remove)
            .with_aliases(&["rm"]),
        CommandEntry::new("set", "Change a field attribute", SET_USAGE, cmd_set),
        CommandEntry::new("show", "Show the grouped layout", "show", cmd_show),
        CommandEntry::new("steps", "List the derived steps", "steps", cmd_steps),
        CommandEntry::new("derive", "Rebuild steps from sections", "derive", cmd_derive),
        CommandEntry::new("save", "Save the form to storage", "save", cmd_save),
    ]
}

fn cmd_new(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let title = required_arg(args, 0, "new <title> [classic|stepped]")?;
    let mut builder = FormBuilder::from_config(title, &context.config, Box::new(context.storage.clone()));
    if let Some(layout) = args.get(1) {
        builder.schema_mut().layout = layout
            .parse::<FormLayout>()
            .map_err(CommandError::InvalidArguments)?;
    }
    io::print_success(format!(
        "Created form `{}` ({} layout).",
        title,
        builder.schema().layout
    ));
    context.builder = Some(builder);
    context.session = None;
    Ok(())
}

fn cmd_open(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = required_arg(args, 0, "open <title-or-slug>")?;
    let schema = context.storage.load_schema(name)?;
    io::print_success(format!(
        "Opened form `{}` ({} fields).",
        schema.title,
        schema.fields.len()
    ));
    context.builder = Some(FormBuilder::new(schema, Box::new(context.storage.clone())));
    context.session = None;
    Ok(())
}

fn cmd_forms(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let forms = context.storage.list_forms()?;
    if forms.is_empty() {
        io::print_info("No saved forms.");
        return Ok(());
    }
    output_section("Saved forms");
    for form in forms {
        io::print_info(format!(
            "  {:<24} {} ({} fields, updated {})",
            form.slug,
            form.title,
            form.field_count,
            form.updated_at.format("%Y-%m-%d %H:%M")
        ));
    }
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "add <type> [index|beside:<field-id>] [--id <field-id>]";
    let (custom_id, positional) = split_id_flag(args)?;
    let raw_type = required_arg(&positional, 0, USAGE)?;
    let field_type: FieldType = raw_type.parse().map_err(|err| {
        let known: Vec<&str> = FieldType::ALL.iter().map(FieldType::as_str).collect();
        CommandError::InvalidArguments(format!("{}. Known types: {}", err, known.join(", ")))
    })?;
    let builder = context.builder_mut()?;
    let slot = parse_slot(positional.get(1).copied(), builder.schema().fields.len())?;

    let created = match custom_id {
        Some(id) => {
            let index = ReorderService::resolve_slot(&builder.schema().fields, &slot);
            if !builder.insert_field(Field::new(id, field_type), index) {
                return Err(CommandError::InvalidArguments(format!(
                    "Field `{}` already exists.",
                    id
                )));
            }
            Some(id.to_string())
        }
        None => match builder.apply_drop(&DragPayload::palette(field_type), &slot) {
            Some(DropOutcome::Created(field)) => Some(field.id),
            _ => None,
        },
    };

    match created {
        Some(id) => {
            let position = builder.schema().position(&id).unwrap_or_default();
            io::print_success(format!(
                "Added {} field `{}` at position {}.",
                field_type, id, position
            ));
        }
        None => io::print_warning("Nothing added."),
    }
    Ok(())
}

/// Pulls `--id <value>` out of the argument list.
fn split_id_flag<'a>(args: &[&'a str]) -> Result<(Option<&'a str>, Vec<&'a str>), CommandError> {
    let mut custom_id = None;
    let mut positional = Vec::new();
    let mut iter = args.iter().copied();
    while let Some(arg) = iter.next() {
        if arg == "--id" {
            let value = iter.next().ok_or_else(|| {
                CommandError::InvalidArguments("`--id` needs a value".into())
            })?;
            custom_id = Some(value);
        } else {
            positional.push(arg);
        }
    }
    Ok((custom_id, positional))
}

fn cmd_move(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "move <field-id> <index|beside:<field-id>>";
    let id = required_arg(args, 0, USAGE)?;
    let target = required_arg(args, 1, USAGE)?;
    let builder = context.builder_mut()?;
    if builder.schema().field(id).is_none() {
        return Err(unknown_field(id));
    }
    let slot = parse_slot(Some(target), builder.schema().fields.len())?;

    match builder.apply_drop(&DragPayload::existing(id), &slot) {
        Some(DropOutcome::Moved { changed: true, .. }) => {
            let position = builder.schema().position(id).unwrap_or_default();
            io::print_success(format!("Moved `{}` to position {}.", id, position));
        }
        _ => io::print_info(format!("`{}` is already there.", id)),
    }
    Ok(())
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = required_arg(args, 0, "remove <field-id>")?;
    if context.builder_mut()?.remove_field(id) {
        io::print_success(format!("Removed `{}`.", id));
        Ok(())
    } else {
        Err(unknown_field(id))
    }
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = required_arg(args, 0, SET_USAGE)?;
    let attribute = required_arg(args, 1, SET_USAGE)?.to_ascii_lowercase();
    let rest = &args[2..];
    let patch = build_patch(&attribute, rest)?;

    if context.builder_mut()?.update_field(id, patch) {
        io::print_success(format!("Updated `{}` {}.", id, attribute));
        Ok(())
    } else {
        Err(unknown_field(id))
    }
}

/// Translates `set` arguments into a patch. `none` clears nullable attributes.
fn build_patch(attribute: &str, rest: &[&str]) -> Result<FieldPatch, CommandError> {
    let text = rest.join(" ");
    let cleared = text.trim().eq_ignore_ascii_case("none");
    let optional_text = || {
        if cleared || text.trim().is_empty() {
            None
        } else {
            Some(text.clone())
        }
    };
    let mut patch = FieldPatch::default();

    match attribute {
        "label" => patch.label = Some(text.clone()),
        "required" => {
            patch.required = Some(match rest.first() {
                Some(value) => parse_bool(value)?,
                None => true,
            })
        }
        "placeholder" => patch.placeholder = Some(optional_text()),
        "description" => patch.description = Some(optional_text()),
        "color" => patch.section_background_color = Some(optional_text()),
        "image" => patch.section_background_image = Some(optional_text()),
        "options" => {
            patch.options = Some(
                text.split(',')
                    .map(str::trim)
                    .filter(|option| !option.is_empty())
                    .map(String::from)
                    .collect(),
            )
        }
        "width" => {
            patch.col_span = Some(match text.trim() {
                "full" | "2" => 2,
                "half" | "1" => 1,
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "width must be full or half, got `{}`",
                        other
                    )))
                }
            })
        }
        "step" => {
            patch.use_as_step = Some(match rest.first() {
                None => None,
                Some(value) if value.eq_ignore_ascii_case("default") => None,
                Some(value) => Some(parse_bool(value)?),
            })
        }
        "maxlength" => {
            patch.validation = Some(if cleared {
                None
            } else {
                let limit = text.trim().parse::<usize>().map_err(|_| {
                    CommandError::InvalidArguments(format!("invalid length `{}`", text))
                })?;
                Some(FieldValidation::max_length(limit))
            })
        }
        "range" => {
            patch.validation = Some(if cleared {
                None
            } else {
                let (Some(min), Some(max)) = (rest.first(), rest.get(1)) else {
                    return Err(CommandError::InvalidArguments("Usage: set <field-id> range <min> <max>".into()));
                };
                Some(FieldValidation::range(parse_number(min)?, parse_number(max)?))
            })
        }
        "rule" => {
            patch.conditional = Some(if cleared {
                None
            } else {
                let (Some(target), Some(operator)) = (rest.first(), rest.get(1)) else {
                    return Err(CommandError::InvalidArguments(
                        "Usage: set <field-id> rule <target-id> <operator> [value]".into(),
                    ));
                };
                Some(ConditionalRule::new(
                    *target,
                    ConditionOperator::from(*operator),
                    rest[2..].join(" "),
                ))
            })
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown attribute `{}`. {}",
                other, SET_USAGE
            )))
        }
    }

    Ok(patch)
}

fn parse_number(value: &str) -> Result<f64, CommandError> {
    value
        .parse::<f64>()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid number `{}`", value)))
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let schema = context.builder()?.schema();
    output_section(format!(
        "{} ({} layout, {} width)",
        schema.name(), schema.layout, schema.form_width
    ));
    if schema.fields.is_empty() {
        io::print_info("No fields yet. Use `add <type>`.");
        return Ok(());
    }
    output::raw(LayoutService::render_outline(&schema.fields));
    io::print_info("Fields:");
    for (index, field) in schema.fields.iter().enumerate() {
        io::print_info(format!("  {:>2}. {:<20} {}", index, field.id, field.display_label()));
    }
    Ok(())
}

fn cmd_steps(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let schema = context.builder()?.schema();
    if schema.steps.is_empty() {
        io::print_info("No steps derived. Use `derive`.");
        return Ok(());
    }
    output_section("Steps");
    for (index, step) in schema.steps.iter().enumerate() {
        io::print_info(format!(
            "  {}. {} [{}]",
            index + 1,
            step.name(),
            step.field_ids.join(", ")
        ));
    }
    Ok(())
}

fn cmd_derive(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let count = context.builder_mut()?.derive_steps().len();
    io::print_success(format!("Derived {} step(s).", count));
    Ok(())
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let builder = context.builder()?;
    builder.save()?;
    let path = context.storage.form_path(&builder.schema().title);
    io::print_success(format!("Saved form to {}.", path.display()));
    Ok(())
}

fn unknown_field(id: &str) -> CommandError {
    CommandError::InvalidArguments(format!("Unknown field `{}`.", id))
}
