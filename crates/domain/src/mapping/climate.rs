//! Climate mode/button ↔ heating-cooling state mapping.

use crate::accessory::HeatingCoolingState;
use crate::error::MappingError;

/// Which characteristic a mapped state is destined for.
///
/// The remote protocol cannot report the live mode during auto operation,
/// so the observed (current) state collapses `auto` to
/// [`HeatingCoolingState::Cool`] while the target state keeps
/// [`HeatingCoolingState::Auto`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The observed operating state.
    Current,
    /// The requested operating state.
    Target,
}

/// The remote-side settings update a heating-cooling state translates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AirconCommand {
    /// Operation mode to set; `None` when only a button is sent.
    pub operation_mode: Option<&'static str>,
    /// Override button; empty string when none.
    pub button: &'static str,
}

/// Map a remote `(mode, button)` pair onto a heating-cooling state.
///
/// With no override button set, `warm` maps to Heat, `cool`/`dry`/`blow`
/// map to Cool, and `auto` maps to Auto for the target view but Cool for
/// the current view. The `power-off` button maps to Off regardless of mode.
///
/// # Errors
///
/// Returns [`MappingError::UnknownMode`] or [`MappingError::UnknownButton`]
/// for values outside that vocabulary.
pub fn to_heating_cooling(
    mode: &str,
    button: &str,
    view: View,
) -> Result<HeatingCoolingState, MappingError> {
    match button {
        "" => match mode {
            "warm" => Ok(HeatingCoolingState::Heat),
            "cool" | "dry" | "blow" => Ok(HeatingCoolingState::Cool),
            "auto" => match view {
                View::Current => Ok(HeatingCoolingState::Cool),
                View::Target => Ok(HeatingCoolingState::Auto),
            },
            other => Err(MappingError::UnknownMode {
                mode: other.to_string(),
            }),
        },
        "power-off" => Ok(HeatingCoolingState::Off),
        other => Err(MappingError::UnknownButton {
            button: other.to_string(),
        }),
    }
}

/// Inverse mapping, used for writes.
#[must_use]
pub fn to_aircon_command(state: HeatingCoolingState) -> AirconCommand {
    match state {
        HeatingCoolingState::Off => AirconCommand {
            operation_mode: None,
            button: "power-off",
        },
        HeatingCoolingState::Heat => AirconCommand {
            operation_mode: Some("warm"),
            button: "",
        },
        HeatingCoolingState::Cool => AirconCommand {
            operation_mode: Some("cool"),
            button: "",
        },
        HeatingCoolingState::Auto => AirconCommand {
            operation_mode: Some("auto"),
            button: "",
        },
    }
}

/// The current state a freshly issued command is reflected as, used for the
/// optimistic echo after a successful settings write.
///
/// # Errors
///
/// Cannot fail for commands produced by [`to_aircon_command`]; the
/// `Result` exists because the mapping runs back through
/// [`to_heating_cooling`].
pub fn echo_current(command: AirconCommand) -> Result<HeatingCoolingState, MappingError> {
    to_heating_cooling(
        command.operation_mode.unwrap_or(""),
        command.button,
        View::Current,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_modes_for_target_view() {
        let cases = [
            ("warm", HeatingCoolingState::Heat),
            ("cool", HeatingCoolingState::Cool),
            ("dry", HeatingCoolingState::Cool),
            ("blow", HeatingCoolingState::Cool),
            ("auto", HeatingCoolingState::Auto),
        ];
        for (mode, expected) in cases {
            assert_eq!(to_heating_cooling(mode, "", View::Target).unwrap(), expected);
        }
    }

    #[test]
    fn should_collapse_auto_to_cool_for_current_view() {
        // Intentionally lossy: the remote protocol cannot report the live
        // mode during auto operation.
        assert_eq!(
            to_heating_cooling("auto", "", View::Current).unwrap(),
            HeatingCoolingState::Cool
        );
        assert_eq!(
            to_heating_cooling("auto", "", View::Target).unwrap(),
            HeatingCoolingState::Auto
        );
    }

    #[test]
    fn should_map_power_off_button_regardless_of_mode() {
        for mode in ["", "warm", "cool", "auto", "whatever"] {
            assert_eq!(
                to_heating_cooling(mode, "power-off", View::Current).unwrap(),
                HeatingCoolingState::Off
            );
        }
    }

    #[test]
    fn should_reject_unknown_mode() {
        let err = to_heating_cooling("turbo", "", View::Target).unwrap_err();
        assert_eq!(
            err,
            MappingError::UnknownMode {
                mode: "turbo".to_string()
            }
        );
    }

    #[test]
    fn should_reject_unknown_button() {
        let err = to_heating_cooling("cool", "swing", View::Target).unwrap_err();
        assert_eq!(
            err,
            MappingError::UnknownButton {
                button: "swing".to_string()
            }
        );
    }

    #[test]
    fn should_emit_power_off_command_for_off() {
        let command = to_aircon_command(HeatingCoolingState::Off);
        assert_eq!(command.operation_mode, None);
        assert_eq!(command.button, "power-off");
    }

    #[test]
    fn should_roundtrip_states_through_command_and_target_view() {
        for state in [
            HeatingCoolingState::Off,
            HeatingCoolingState::Heat,
            HeatingCoolingState::Cool,
            HeatingCoolingState::Auto,
        ] {
            let command = to_aircon_command(state);
            let back = to_heating_cooling(
                command.operation_mode.unwrap_or(""),
                command.button,
                View::Target,
            )
            .unwrap();
            assert_eq!(back, state);
        }
    }

    #[test]
    fn should_echo_auto_command_as_cool() {
        let command = to_aircon_command(HeatingCoolingState::Auto);
        assert_eq!(
            echo_current(command).unwrap(),
            HeatingCoolingState::Cool
        );
    }

    #[test]
    fn should_echo_other_commands_unchanged() {
        for state in [
            HeatingCoolingState::Off,
            HeatingCoolingState::Heat,
            HeatingCoolingState::Cool,
        ] {
            assert_eq!(echo_current(to_aircon_command(state)).unwrap(), state);
        }
    }
}
