use std::cell::RefCell;
use std::rc::Rc;

use log::{error, info};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::{
    SharedController, chart_canvas::ChartCanvas, controls_panel::ControlsPanel,
    game_over_overlay::GameOverOverlay, grid_view::GridView, session_panel::SessionPanel,
    stats_panel::StatsPanel,
};
use crate::client::{Action, ActionClient, HttpTransport};
use crate::config::{ClientConfig, NAME_KEY, SEED_KEY, SESSION_KEY};
use crate::presenters::ChartKind;
use crate::score::is_insolvent;
use crate::session::{Outcome, SessionController, SessionState};
use crate::util::{storage_get, storage_set};

fn load_or_create_session() -> String {
    if let Some(id) = storage_get(SESSION_KEY) {
        return id;
    }
    let id = uuid::Uuid::new_v4().to_string();
    storage_set(SESSION_KEY, &id);
    id
}

fn restart_action(seed: Option<u64>) -> Action {
    match seed {
        Some(seed) => Action::init_with_seed(seed),
        None => Action::init(),
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| ClientConfig::load());
    let client = {
        let config = config.clone();
        use_memo((), move |_| {
            ActionClient::new(HttpTransport::new(config.endpoint()), load_or_create_session())
        })
    };
    let controller = {
        let height = config.chart_height;
        use_memo((), move |_| {
            SharedController(Rc::new(RefCell::new(SessionController::new(400.0, height))))
        })
    };
    let revision = use_state(|| 0u64);
    let status = use_state(|| None::<String>);
    let name = use_state(|| storage_get(NAME_KEY).unwrap_or_default());
    let seed = use_state(|| {
        storage_get(SEED_KEY)
            .and_then(|s| s.parse::<u64>().ok())
            .or(config.default_seed)
    });

    // Requests are not serialized; the controller drops responses and failures
    // that arrive after a newer one has been applied.
    let run: Callback<Action> = {
        let controller = (*controller).clone();
        let client = client.clone();
        let revision = revision.clone();
        let status = status.clone();
        Callback::from(move |action: Action| {
            let controller = controller.clone();
            let client = client.clone();
            let revision = revision.clone();
            let status = status.clone();
            spawn_local(async move {
                match SessionController::dispatch(&controller.0, &*client, &action).await {
                    Ok(Outcome::Applied) => {
                        status.set(None);
                        revision.set(controller.0.borrow().revision());
                    }
                    Ok(Outcome::Stale) => {}
                    Err(e) => status.set(Some(e.to_string())),
                }
            });
        })
    };

    // Bootstrap: exactly one init per page load.
    {
        let run = run.clone();
        let seed = *seed;
        use_effect_with((), move |_| {
            info!("starting session");
            run.emit(restart_action(seed));
            || ()
        });
    }

    let on_save_name = {
        let client = client.clone();
        let name = name.clone();
        let status = status.clone();
        Callback::from(move |new_name: String| {
            storage_set(NAME_KEY, &new_name);
            name.set(new_name.clone());
            let client = client.clone();
            let status = status.clone();
            spawn_local(async move {
                if let Err(e) = client.set_name(&new_name).await {
                    error!("set_name failed: {}", e);
                    status.set(Some(e.to_string()));
                }
            });
        })
    };
    let on_apply_seed = {
        let run = run.clone();
        let seed = seed.clone();
        Callback::from(move |new_seed: u64| {
            storage_set(SEED_KEY, &new_seed.to_string());
            seed.set(Some(new_seed));
            run.emit(Action::init_with_seed(new_seed));
        })
    };
    let on_restart = {
        let run = run.clone();
        let seed = *seed;
        Callback::from(move |()| run.emit(restart_action(seed)))
    };

    let ctrl = controller.0.borrow();
    let active = ctrl.state() == SessionState::Active;
    let snapshot = ctrl.snapshot();
    let score = ctrl.score();
    let score_label = match (score, snapshot) {
        (Some(score), Some(snap)) => score.label(&snap.actions),
        _ => "Starting…".to_string(),
    };
    let is_final = score.map(|s| s.is_final).unwrap_or(false);
    let turn = snapshot.map(|s| s.turn_count()).unwrap_or(0);
    let insolvent = snapshot.map(is_insolvent).unwrap_or(false);
    let chart_height = config.chart_height;

    let charts = ChartKind::ALL.iter().map(|&kind| {
        html! { <ChartCanvas {kind} controller={(*controller).clone()} revision={*revision} height={chart_height} /> }
    });

    html! {<div style="display:flex; gap:16px; padding:16px; background:#0e1116; color:#c9d1d9; min-height:100vh; box-sizing:border-box; font-family:sans-serif;">
        <div style="width:340px; flex-shrink:0; display:flex; flex-direction:column; gap:12px;">
            <SessionPanel
                session_id={client.session_id().to_string()}
                name={(*name).clone()}
                seed={*seed}
                on_save_name={on_save_name}
                on_apply_seed={on_apply_seed}
                on_restart={on_restart.clone()}
            />
            <StatsPanel score_label={score_label.clone()} turn={turn} insolvent={insolvent} status={(*status).clone()} />
            <ControlsPanel on_action={run} disabled={!active} game_over={is_final} />
        </div>
        <div style="flex:1; min-width:0; display:flex; flex-direction:column; gap:12px;">
            <div style="display:grid; grid-template-columns:repeat(2, minmax(0, 1fr)); gap:12px;">
                { for charts }
            </div>
            <GridView controller={(*controller).clone()} revision={*revision} />
        </div>
        <GameOverOverlay show={is_final} score_label={score_label} restart={on_restart} />
    </div>}
}
