use leptos::*;
use shared::{
    report::{WidgetInfo, WIDGETS},
    reveal::{FADE_IN, REVEAL_UP, SCALE_IN},
};

#[component]
fn Headline(label: &'static str, value: &'static str) -> impl IntoView {
    view! {
        <div class={format!("kpi {SCALE_IN}")}>
            <span class="kpi-value">{value}</span>
            <span class="kpi-label">{label}</span>
        </div>
    }
}

/// Card around one lazily mounted chart. The canvas id is the mount point.
#[component]
fn ChartCard(info: WidgetInfo) -> impl IntoView {
    view! {
        <section class={format!("card {REVEAL_UP}")}>
            <h2>{info.title}</h2>
            <p class="caption">{info.caption}</p>
            <div class="chart-frame">
                <canvas id={info.mount_id}></canvas>
            </div>
        </section>
    }
}

#[component]
pub fn App() -> impl IntoView {
    view! {
        <main class="container">
            <header class={format!("hero {FADE_IN}")}>
                <h1>"Calorie expenditure prediction"</h1>
                <p>"Physics formula baseline, tuned tree ensemble and 5-fold out-of-fold validation."</p>
            </header>
            <div class="kpis">
                <Headline label="Ensemble RMSE" value="0.0626"/>
                <Headline label="Formula RMSE" value="0.2895"/>
                <Headline label="Exact after rounding" value="99.55%"/>
            </div>
            <div class="grid">
                {WIDGETS.iter().map(|info| view! { <ChartCard info={*info}/> }).collect_view()}
            </div>
        </main>
    }
}
