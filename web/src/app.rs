use clap::Args;
use pixelwar_core::*;
use pixelwar_protocol::{DEFAULT_SERVER, Endpoints};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::backend::HttpBackend;
use crate::scheduler::TimerScheduler;
use crate::storage::BrowserPreferences;
use crate::view::{ViewState, notice_class};

pub(crate) enum Msg {
    ChooseTeam(Team),
    PaintCell(CellPos),
    ColorInput(String),
    UidInput(String),
    ToggleMask,
    Replied(Reply),
    Tick(Ticket),
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct AppProps {
    /// Base URL of the pixel API
    #[arg(long, default_value = DEFAULT_SERVER)]
    pub(crate) server: String,
}

pub(crate) struct PixelWarView {
    client: PixelClient<TimerScheduler, BrowserPreferences>,
    backend: HttpBackend,
    view: ViewState,
    color: String,
}

impl PixelWarView {
    const DEFAULT_COLOR: &'static str = "#000000";

    /// Runs each call in the background, its reply comes back as [`Msg::Replied`].
    fn spawn(&self, ctx: &Context<Self>, calls: Vec<Call>) {
        for call in calls {
            let backend = self.backend.clone();
            ctx.link()
                .send_future(async move { Msg::Replied(call.run(&backend).await) });
        }
    }

    fn paint_cell(&mut self, (row, col): CellPos) -> Vec<Call> {
        if self.client.select_cell(row, col, &mut self.view).is_err() {
            return Vec::new();
        }
        self.client
            .submit_edit(self.color.clone(), &mut self.view)
            .ok()
            .into_iter()
            .collect()
    }

    fn view_teams(&self, ctx: &Context<Self>) -> Html {
        let disabled = !self.view.is_enabled(Controls::TEAM);
        html! {
            <nav class="teams">
                {
                    for Team::ALL.into_iter().map(|team| {
                        let class = classes!(
                            "team",
                            team.token(),
                            self.view.is_highlighted(team).then_some("selected"),
                        );
                        let onclick = ctx.link().callback(move |_| Msg::ChooseTeam(team));
                        html! {
                            <button {class} {onclick} {disabled} value={team.token()}>
                                {team.to_string()}
                            </button>
                        }
                    })
                }
            </nav>
        }
    }

    fn view_identity(&self, ctx: &Context<Self>) -> Html {
        let identity = self.client.session().identity();
        let input_type = if identity.masked { "password" } else { "text" };
        let oninput = ctx.link().callback(|e: InputEvent| {
            Msg::UidInput(e.target_unchecked_into::<HtmlInputElement>().value())
        });
        let cb_toggle_mask = ctx.link().callback(|_| Msg::ToggleMask);
        let oninput_color = ctx.link().callback(|e: InputEvent| {
            Msg::ColorInput(e.target_unchecked_into::<HtmlInputElement>().value())
        });

        html! {
            <fieldset class="identity">
                <input id="name" type={input_type} placeholder="UID" value={identity.input.clone()} {oninput}/>
                <button id="eye-open" class={classes!(identity.masked.then_some("masked"))} onclick={cb_toggle_mask}>
                    {"👁"}
                </button>
                <input id="color" type="color" value={self.color.clone()} oninput={oninput_color}/>
            </fieldset>
        }
    }

    fn view_grid(&self, ctx: &Context<Self>) -> Html {
        let Some(grid) = self.view.grid.as_ref() else {
            return html! { <table id="tableau"/> };
        };
        let editable = self.view.is_enabled(Controls::PIXEL);

        html! {
            <table id="tableau" class={classes!(editable.then_some("editable"))}>
                {
                    for grid.iter_rows().enumerate().map(|(row, cells)| html! {
                        <tr>
                            {
                                for cells.enumerate().map(|(col, color)| {
                                    let style = format!("background-color: {color}");
                                    let onclick = editable.then(|| {
                                        ctx.link()
                                            .callback(move |_: MouseEvent| Msg::PaintCell((row, col)))
                                    });
                                    html! { <td {style} {onclick}/> }
                                })
                            }
                        </tr>
                    })
                }
            </table>
        }
    }

    fn view_activity(&self) -> Html {
        html! {
            <table id="information">
                <thead>
                    <tr>
                        <th>{"Nom"}</th>
                        <th>{"Équipe"}</th>
                        <th>{"Dernière modification"}</th>
                        <th>{"Banni"}</th>
                        <th>{"Pixels modifiés"}</th>
                    </tr>
                </thead>
                <tbody>
                    {
                        for self.view.activity.iter().map(|player| html! {
                            <tr>
                                <td>{player.name.clone()}</td>
                                <td>{player.team.clone()}</td>
                                <td>{player.last_modified_at.clone().unwrap_or_default()}</td>
                                <td>{player.banned.to_string()}</td>
                                <td>{player.edit_count.to_string()}</td>
                            </tr>
                        })
                    }
                </tbody>
            </table>
        }
    }
}

impl Component for PixelWarView {
    type Message = Msg;
    type Properties = AppProps;

    fn create(ctx: &Context<Self>) -> Self {
        let endpoints = Endpoints::new(ctx.props().server.clone());
        log::info!("pixel API at {}", endpoints.base());

        let scheduler = TimerScheduler::new(ctx.link().clone());
        let mut client = PixelClient::new(scheduler, BrowserPreferences);
        let mut view = ViewState::default();
        let calls = client.start(&mut view);

        let this = Self {
            client,
            backend: HttpBackend::new(endpoints),
            view,
            color: Self::DEFAULT_COLOR.to_string(),
        };
        this.spawn(ctx, calls);
        this
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let calls = match msg {
            Msg::ChooseTeam(team) => {
                log::debug!("team clicked: {}", team);
                self.client
                    .choose_team(team, &mut self.view)
                    .ok()
                    .into_iter()
                    .collect()
            }
            Msg::PaintCell(pos) => {
                log::debug!("cell clicked: {:?}", pos);
                self.paint_cell(pos)
            }
            Msg::ColorInput(color) => {
                self.color = color;
                return false;
            }
            Msg::UidInput(input) => {
                self.client.set_identity_input(input);
                Vec::new()
            }
            Msg::ToggleMask => {
                self.client.toggle_identity_mask();
                Vec::new()
            }
            Msg::Replied(reply) => self.client.on_reply(reply, &mut self.view),
            Msg::Tick(ticket) => {
                self.client.tick(ticket, &mut self.view);
                Vec::new()
            }
        };
        self.spawn(ctx, calls);
        true
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        for text in self.view.take_alerts() {
            gloo::dialogs::alert(&text);
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let status = self.view.status.as_ref().map(|notice| {
            html! {
                <p id="info_serveur" class={notice_class(notice.level)}>{notice.text.clone()}</p>
            }
        });

        html! {
            <div class="pixelwar">
                {self.view_identity(ctx)}
                {self.view_teams(ctx)}
                <p id="temps-equipe">{self.view.countdown(Gate::TeamSwitch).to_string()}</p>
                <p id="temps-attente">{self.view.countdown(Gate::PixelEdit).to_string()}</p>
                <p id="temps-reset">{self.view.countdown(Gate::PenaltyReset).to_string()}</p>
                {for status}
                {self.view_grid(ctx)}
                {self.view_activity()}
            </div>
        }
    }
}
