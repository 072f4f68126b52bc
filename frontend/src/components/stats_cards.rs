use shared::StudentStats;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatsCardsProps {
    pub stats: StudentStats,
}

#[function_component(StatsCards)]
pub fn stats_cards(props: &StatsCardsProps) -> Html {
    let cards = [
        ("Total Students", props.stats.total),
        ("Male", props.stats.male),
        ("Female", props.stats.female),
        ("Programs", props.stats.programs),
    ];

    html! {
        <div class="row g-3 mb-4">
            { for cards.iter().map(|(label, value)| html! {
                <div class="col-6 col-md-3">
                    <div class="card stat-card text-center">
                        <div class="card-body">
                            <div class="stat-value">{ value.to_string() }</div>
                            <div class="stat-label text-muted">{ *label }</div>
                        </div>
                    </div>
                </div>
            }) }
        </div>
    }
}
