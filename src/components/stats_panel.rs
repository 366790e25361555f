use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsPanelProps {
    pub score_label: String,
    pub turn: usize,
    pub insolvent: bool,
    pub status: Option<String>,
}

#[function_component]
pub fn StatsPanel(props: &StatsPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;";
    let label_style = "flex:1; font-weight:500;";
    let value_style =
        "min-width:70px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    html! {
        <div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; display:flex; flex-direction:column; gap:8px; font-size:14px;">
            <div style="font-size:18px; font-weight:600; color:#58a6ff;">{ props.score_label.clone() }</div>
            <div style={row_style}>
                <span style={label_style}>{"Turn"}</span>
                <span style={value_style}>{ props.turn }</span>
            </div>
            { if props.insolvent { html!{ <div style="color:#f85149; font-size:12px;">{"Costs exceed production: score is zeroed"}</div> } } else { html!{} } }
            { if let Some(msg) = &props.status { html!{ <div style="font-size:12px; background:#1c2128; border:1px solid #f85149; padding:4px 6px; border-radius:6px; color:#f85149;">{ msg.clone() }</div> } } else { html!{} } }
        </div>
    }
}
