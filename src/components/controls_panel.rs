use yew::prelude::*;

use crate::client::Action;
use crate::interventions::{Category, catalog};

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub on_action: Callback<Action>,
    pub disabled: bool,
    /// Turn controls lock once the game is over. Undo stays available.
    pub game_over: bool,
}

/// Which controls are locked: `(turns, undo)`.
fn locks(disabled: bool, game_over: bool) -> (bool, bool) {
    (disabled || game_over, disabled)
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let emit = |action: Action| {
        let cb = props.on_action.clone();
        Callback::from(move |_| cb.emit(action.clone()))
    };
    let (locked, undo_locked) = locks(props.disabled, props.game_over);
    let interventions = catalog();
    let rows = Category::ALL.iter().map(|&category| {
        let buttons = interventions
            .iter()
            .filter(|i| i.category == category)
            .map(|i| match Action::intervention(i) {
                Some(action) => html! {
                    <button disabled={locked} onclick={emit(action)} style="flex:1; padding:3px 6px;">{ i.level.label() }</button>
                },
                None => html! {
                    <button disabled=true title="Not offered by the engine" style="flex:1; padding:3px 6px; opacity:0.4;">{ i.level.label() }</button>
                },
            });
        html! {<div style="display:flex; align-items:center; gap:6px;">
            <span style="width:110px; font-size:12px;">{ category.name() }</span>
            { for buttons }
        </div>}
    });
    html! {<div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; display:flex; flex-direction:column; gap:6px;">
        <div style="display:flex; gap:6px;">
            <button disabled={locked} onclick={emit(Action::nothing())} style="flex:1;">{"No intervention"}</button>
            <button disabled={undo_locked} onclick={emit(Action::undo())}>{"Undo"}</button>
        </div>
        { for rows }
    </div>}
}

#[cfg(test)]
mod tests {
    use super::locks;

    #[test]
    fn undo_survives_game_over() {
        assert_eq!(locks(false, false), (false, false));
        assert_eq!(locks(false, true), (true, false));
        assert_eq!(locks(true, false), (true, true));
    }
}
