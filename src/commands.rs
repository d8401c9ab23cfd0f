use std::fmt;

use blockcraft_core::{get_name, BlockType, ItemStack, ItemType};
use blockcraft_ui::{ClickKind, ClickOutcome};
use blockcraft_world::{
    calculate_dig_time, can_harvest_block, get_block_drop, CraftAmount, DigTime, SlotAddress,
    HOTBAR_SIZE, TOTAL_SLOTS,
};
use egui::Pos2;

use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
    message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommandError {}

/// Where a click lands: screen coordinates or a flat slot index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickTarget {
    Pointer(Pos2),
    Slot(SlotAddress),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Help,
    Give {
        item: ItemType,
        count: u32,
    },
    Click {
        kind: ClickKind,
        target: ClickTarget,
    },
    Select {
        slot: usize,
    },
    Fill {
        output: ItemType,
        amount: CraftAmount,
    },
    Dig {
        block: BlockType,
        tool: Option<ItemType>,
    },
    Show,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub lines: Vec<String>,
}

pub fn execute_command(session: &mut Session<'_>, cmd: SessionCommand) -> CommandOutput {
    let mut out = CommandOutput::default();
    match cmd {
        SessionCommand::Help => {
            out.lines.extend(help_lines());
        }
        SessionCommand::Give { item, count } => {
            if count == 0 {
                out.lines.push("Error: give count must be > 0".to_string());
                return out;
            }
            let leftover = session.give_item(item, count);
            let given = count.saturating_sub(leftover);
            if given > 0 {
                out.lines.push(format!("Gave {given}× {}", get_name(item)));
            }
            if leftover > 0 {
                out.lines.push(format!("Inventory full; {leftover}× not given"));
            }
        }
        SessionCommand::Click { kind, target } => {
            let addr = match target {
                ClickTarget::Slot(addr) => addr,
                ClickTarget::Pointer(pos) => {
                    match session.controller().layout().get_clicked_slot(pos) {
                        Some(addr) => addr,
                        None => {
                            out.lines.push(format!("No slot at {:.1} {:.1}", pos.x, pos.y));
                            return out;
                        }
                    }
                }
            };
            let (controller, inventory) = session.parts();
            let outcome = controller.click(inventory, addr, kind);
            let label = format!("{kind:?} {:?}[{}]", addr.section, addr.index);
            if !outcome.changed() {
                out.lines.push(format!("{label}: nothing to do"));
                return out;
            }
            out.lines.push(format!(
                "{label} -> held {}, output {}",
                describe(session.inventory().held_item()),
                describe(session.inventory().crafting_output()),
            ));
            if let ClickOutcome::Dropped(stack) = outcome {
                out.lines.push(format!("Storage full; dropped {}", describe(&stack)));
            }
        }
        SessionCommand::Select { slot } => {
            session.inventory_mut().set_selected_hotbar_slot(slot);
            out.lines.push(format!(
                "Selected hotbar slot {slot}: {}",
                describe(session.inventory().get_selected_hotbar_item())
            ));
        }
        SessionCommand::Fill { output, amount } => {
            let engine = *session.controller().engine();
            let Some(recipe) = engine.recipe_for(output) else {
                out.lines.push(format!("Error: no recipe makes {}", get_name(output)));
                return out;
            };
            let crafts = engine.auto_place_ingredients(session.inventory_mut(), recipe, amount);
            if crafts == 0 {
                out.lines.push(format!(
                    "Cannot lay out {}: missing ingredients or no room",
                    get_name(output)
                ));
            } else {
                out.lines.push(format!(
                    "Placed {crafts} craft(s) of {}; output {}",
                    get_name(output),
                    describe(session.inventory().crafting_output())
                ));
            }
        }
        SessionCommand::Dig { block, tool } => {
            let tool = tool.unwrap_or_else(|| {
                session.inventory().get_selected_hotbar_item().item_type
            });
            match calculate_dig_time(block, tool) {
                DigTime::Unbreakable => {
                    out.lines.push(format!("{block:?} cannot be broken"));
                    return out;
                }
                DigTime::Instant => out.lines.push(format!("Dug {block:?} instantly")),
                DigTime::Seconds(secs) => {
                    out.lines.push(format!("Dug {block:?} in {secs:.2}s"))
                }
            }
            if !can_harvest_block(block, tool) {
                out.lines.push(format!("{block:?} needs a better tool; nothing dropped"));
                return out;
            }
            let drop = get_block_drop(block);
            if drop.is_empty() {
                return out;
            }
            let leftover = session.give_item(drop.item_type, u32::from(drop.count));
            if leftover == 0 {
                out.lines.push(format!("Collected {}", describe(&drop)));
            } else {
                out.lines.push(format!(
                    "Inventory full; {leftover}× {} left on the ground",
                    get_name(drop.item_type)
                ));
            }
        }
        SessionCommand::Show => {
            for (addr, stack) in session.inventory().slots() {
                if !stack.is_empty() {
                    out.lines.push(format!("Slot {}: {}", addr.global(), describe(stack)));
                }
            }
            let held = session.inventory().held_item();
            if !held.is_empty() {
                out.lines.push(format!("Held: {}", describe(held)));
            }
            if out.lines.is_empty() {
                out.lines.push("Inventory is empty".to_string());
            }
        }
    }
    out
}

pub fn parse_command(input: &str) -> Result<SessionCommand, CommandError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(SessionCommand::Help);
    }

    let input = input.strip_prefix('/').unwrap_or(input).trim();
    if input.is_empty() {
        return Ok(SessionCommand::Help);
    }

    let mut parts = input.split_whitespace();
    let cmd = parts
        .next()
        .ok_or_else(|| CommandError::new("Missing command"))?
        .to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    match cmd.as_str() {
        "help" | "?" => Ok(SessionCommand::Help),
        "give" => {
            if !(1..=2).contains(&args.len()) {
                return Err(CommandError::new("Usage: /give <item> [count]"));
            }
            let item = parse_item(args[0])?;
            let count = if args.len() == 2 {
                parse_positive_u32(args[1]).map_err(|_| CommandError::new("Invalid give count"))?
            } else {
                1
            };
            Ok(SessionCommand::Give { item, count })
        }
        "click" => {
            if args.len() != 3 {
                return Err(CommandError::new("Usage: /click <left|right|shift> <x> <y>"));
            }
            let kind = parse_click_kind(args[0])?;
            let x = parse_coord(args[1])?;
            let y = parse_coord(args[2])?;
            Ok(SessionCommand::Click {
                kind,
                target: ClickTarget::Pointer(Pos2::new(x, y)),
            })
        }
        "slot" => {
            if args.len() != 2 {
                return Err(CommandError::new("Usage: /slot <left|right|shift> <index>"));
            }
            let kind = parse_click_kind(args[0])?;
            let addr = args[1]
                .parse::<usize>()
                .ok()
                .and_then(SlotAddress::from_global)
                .ok_or_else(|| {
                    CommandError::new(format!("Slot index must be 0-{}", TOTAL_SLOTS - 1))
                })?;
            Ok(SessionCommand::Click {
                kind,
                target: ClickTarget::Slot(addr),
            })
        }
        "select" => {
            let [slot] = args.as_slice() else {
                return Err(CommandError::new("Usage: /select <hotbar-slot>"));
            };
            let slot = slot
                .parse::<usize>()
                .ok()
                .filter(|slot| *slot < HOTBAR_SIZE)
                .ok_or_else(|| {
                    CommandError::new(format!("Hotbar slot must be 0-{}", HOTBAR_SIZE - 1))
                })?;
            Ok(SessionCommand::Select { slot })
        }
        "fill" => {
            if !(1..=2).contains(&args.len()) {
                return Err(CommandError::new("Usage: /fill <output-item> [count|max]"));
            }
            let output = parse_item(args[0])?;
            let amount = match args.get(1) {
                None => CraftAmount::Exactly(1),
                Some(arg) if arg.eq_ignore_ascii_case("max") => CraftAmount::Max,
                Some(arg) => CraftAmount::Exactly(
                    parse_positive_u32(arg).map_err(|_| CommandError::new("Invalid fill count"))?,
                ),
            };
            Ok(SessionCommand::Fill { output, amount })
        }
        "dig" => {
            if !(1..=2).contains(&args.len()) {
                return Err(CommandError::new("Usage: /dig <block> [tool-item]"));
            }
            let block = BlockType::from_key(args[0])
                .ok_or_else(|| CommandError::new(format!("Unknown block: {}", args[0])))?;
            let tool = args.get(1).map(|arg| parse_item(arg)).transpose()?;
            Ok(SessionCommand::Dig { block, tool })
        }
        "show" | "inv" => Ok(SessionCommand::Show),
        _ => Err(CommandError::new(format!("Unknown command: {cmd}. Try /help"))),
    }
}

fn describe(stack: &ItemStack) -> String {
    if stack.is_empty() {
        "empty".to_string()
    } else {
        format!("{}× {}", stack.count, get_name(stack.item_type))
    }
}

fn parse_positive_u32(s: &str) -> Result<u32, ()> {
    match s.parse::<u32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(()),
    }
}

fn parse_coord(s: &str) -> Result<f32, CommandError> {
    s.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CommandError::new(format!("Invalid coordinate: {s}")))
}

fn parse_click_kind(token: &str) -> Result<ClickKind, CommandError> {
    let kind = match token.to_ascii_lowercase().as_str() {
        "left" | "l" => ClickKind::Left,
        "right" | "r" => ClickKind::Right,
        "shift" | "shift-left" | "s" => ClickKind::ShiftLeft,
        _ => return Err(CommandError::new("Click kind must be left, right or shift")),
    };
    Ok(kind)
}

fn parse_item(token: &str) -> Result<ItemType, CommandError> {
    ItemType::from_key(token)
        .filter(|item| !item.is_none())
        .ok_or_else(|| CommandError::new(format!("Unknown item: {token}")))
}

fn help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  /help".to_string(),
        "  /give <item> [count]".to_string(),
        "  /click <left|right|shift> <x> <y>   (screen coordinates)".to_string(),
        "  /slot <left|right|shift> <index>    (0-8 hotbar, 9-35 main, 36-44 grid, 45 output)"
            .to_string(),
        "  /select <hotbar-slot>".to_string(),
        "  /fill <output-item> [count|max]".to_string(),
        "  /dig <block> [tool-item]".to_string(),
        "  /show".to_string(),
    ]
}
