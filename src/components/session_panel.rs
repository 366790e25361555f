use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SessionPanelProps {
    pub session_id: String,
    pub name: String,
    pub seed: Option<u64>,
    pub on_save_name: Callback<String>,
    pub on_apply_seed: Callback<u64>,
    pub on_restart: Callback<()>,
}

/// Session id, display name and seed editors.
#[function_component]
pub fn SessionPanel(props: &SessionPanelProps) -> Html {
    let name_draft = use_state(|| props.name.clone());
    let seed_draft = use_state(|| props.seed.map(|s| s.to_string()).unwrap_or_default());
    let seed_valid = seed_draft.trim().parse::<u64>().is_ok();

    let on_name_input = {
        let name_draft = name_draft.clone();
        Callback::from(move |e: InputEvent| {
            name_draft.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_seed_input = {
        let seed_draft = seed_draft.clone();
        Callback::from(move |e: InputEvent| {
            seed_draft.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let save_name_cb = {
        let cb = props.on_save_name.clone();
        let name_draft = name_draft.clone();
        Callback::from(move |_| cb.emit(name_draft.trim().to_string()))
    };
    let apply_seed_cb = {
        let cb = props.on_apply_seed.clone();
        let seed_draft = seed_draft.clone();
        Callback::from(move |_| {
            if let Ok(seed) = seed_draft.trim().parse::<u64>() {
                cb.emit(seed);
            }
        })
    };
    let restart_cb = {
        let cb = props.on_restart.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {<div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; display:flex; flex-direction:column; gap:8px; font-size:13px;">
        <div style="font-size:11px; opacity:0.7;">{ format!("Session {}", props.session_id) }</div>
        <label style="display:flex; align-items:center; gap:8px;">
            <span style="width:44px;">{"Name"}</span>
            <input type="text" value={(*name_draft).clone()} oninput={on_name_input} style="flex:1;" />
            <button onclick={save_name_cb}>{"Save"}</button>
        </label>
        <label style="display:flex; align-items:center; gap:8px;">
            <span style="width:44px;">{"Seed"}</span>
            <input type="text" inputmode="numeric" value={(*seed_draft).clone()} oninput={on_seed_input} style="flex:1;" />
            <button disabled={!seed_valid} onclick={apply_seed_cb}>{"Apply"}</button>
        </label>
        <button onclick={restart_cb}>{"Restart"}</button>
    </div>}
}
