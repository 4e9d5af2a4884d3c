//! RPC command handlers for the markers pane
//!
//! Each handler parses its params before touching the registry, so a bad
//! request neither mutates state nor produces an event.

use serde_json::Value;

use crate::markers::json::marker_set_from_json;
use crate::session::error::ParamError;
use crate::session::module::MarkersModule;
use crate::session::notifier::{AutoSelect, Notifier};

fn param(params: &Value, index: usize) -> Result<Option<&Value>, ParamError> {
    match params {
        Value::Null => Ok(None),
        Value::Array(items) => Ok(items.get(index)),
        _ => Err(ParamError::NotAnArray),
    }
}

fn string_param(params: &Value, index: usize) -> Result<&str, ParamError> {
    param(params, index)?
        .ok_or(ParamError::Missing(index))?
        .as_str()
        .ok_or(ParamError::InvalidType {
            index,
            expected: "a string",
        })
}

/// `markers_tab_closed`: the client closed the pane, drop everything
pub fn markers_tab_closed<N: Notifier>(
    module: &mut MarkersModule<N>,
    _params: &Value,
) -> Result<(), ParamError> {
    module.registry_mut().clear();
    module.fire_markers_changed(AutoSelect::None);
    Ok(())
}

/// `update_active_marker_set`: params `[name]`
pub fn update_active_marker_set<N: Notifier>(
    module: &mut MarkersModule<N>,
    params: &Value,
) -> Result<(), ParamError> {
    let name = string_param(params, 0)?;

    module.registry_mut().set_active_by_name(name);
    module.fire_markers_changed(AutoSelect::None);
    Ok(())
}

/// `clear_active_marker_set`: drop the active set
pub fn clear_active_marker_set<N: Notifier>(
    module: &mut MarkersModule<N>,
    _params: &Value,
) -> Result<(), ParamError> {
    module.registry_mut().clear_active_markers();
    module.fire_markers_changed(AutoSelect::None);
    Ok(())
}

/// `show_markers`: params `[set, auto_select?]`, auto_select defaults to first
pub fn show_markers<N: Notifier>(
    module: &mut MarkersModule<N>,
    params: &Value,
) -> Result<(), ParamError> {
    let set_json = param(params, 0)?.ok_or(ParamError::Missing(0))?;
    let set = marker_set_from_json(set_json, module.aliases()).map_err(|_| {
        ParamError::InvalidType {
            index: 0,
            expected: "a marker set",
        }
    })?;

    let auto_select = match param(params, 1)? {
        None => AutoSelect::First,
        Some(value) => value
            .as_i64()
            .and_then(AutoSelect::from_wire)
            .ok_or(ParamError::InvalidType {
                index: 1,
                expected: "an auto-select value (0, 1 or 2)",
            })?,
    };

    module.show_markers(set, auto_select);
    Ok(())
}
