// Buttons and rows used by paginated messages

use twilight_model::channel::message::{
    component::{ActionRow, Button, ButtonStyle},
    Component, ReactionType,
};

pub const PREVIOUS_EMOJI: &str = "\u{25c0}";
pub const NEXT_EMOJI: &str = "\u{25b6}";
pub const TRASH_EMOJI: &str = "\u{1f5d1}";

pub fn emoji_button(
    custom_id: impl Into<String>,
    emoji: &str,
    style: ButtonStyle,
) -> Button {
    Button {
        custom_id: Some(custom_id.into()),
        disabled: false,
        emoji: Some(ReactionType::Unicode {
            name: emoji.to_owned(),
        }),
        label: None,
        style,
        url: None,
    }
}

pub fn label_button(
    custom_id: impl Into<String>,
    label: impl Into<String>,
    style: ButtonStyle,
    disabled: bool,
) -> Button {
    Button {
        custom_id: Some(custom_id.into()),
        disabled,
        emoji: None,
        label: Some(label.into()),
        style,
        url: None,
    }
}

/// Wraps buttons into single action row, order is preserved
pub fn action_row(buttons: impl IntoIterator<Item = Button>) -> Component {
    let components = buttons.into_iter().map(Component::Button).collect();

    Component::ActionRow(ActionRow { components })
}

/// Collects every button from a message components,
/// including the ones nested inside action rows
pub fn buttons(components: &[Component]) -> Vec<&Button> {
    let mut out = Vec::new();

    for component in components {
        match component {
            Component::Button(button) => out.push(button),
            Component::ActionRow(row) => {
                out.extend(row.components.iter().filter_map(|c| match c {
                    Component::Button(button) => Some(button),
                    _ => None,
                }))
            }
            _ => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_row_keeps_order() {
        let row = action_row([
            emoji_button("a", PREVIOUS_EMOJI, ButtonStyle::Secondary),
            label_button("b", "1/2", ButtonStyle::Secondary, true),
            emoji_button("c", NEXT_EMOJI, ButtonStyle::Secondary),
        ]);

        let components = [row];
        let ids: Vec<_> = buttons(&components)
            .iter()
            .filter_map(|b| b.custom_id.as_deref())
            .collect();

        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_buttons_outside_rows() {
        let components = [
            Component::Button(label_button("x", "x", ButtonStyle::Danger, false)),
            action_row([emoji_button("y", TRASH_EMOJI, ButtonStyle::Danger)]),
        ];

        assert_eq!(buttons(&components).len(), 2);
    }
}
