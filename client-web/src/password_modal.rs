use client_common::{
    ModalConfig, RpcClient, perform,
    form::{CloseReason, Effect, Event, FeedbackKind, FieldId, FormState, Modal, Toggle, TOGGLES},
};
use tracing::trace;
use yew::prelude::*;
use yew::services::{TimeoutService, timeout::TimeoutTask};
use yewtil::future::LinkFuture;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub config: ModalConfig,
}

pub struct PasswordModal {
    link: ComponentLink<Self>,
    client: RpcClient,
    state: FormState,
    close_task: Option<TimeoutTask>,
}

pub enum Msg {
    Form(Event),
}

impl Component for PasswordModal {
    type Message = Msg;
    type Properties = Props;

    fn create(props: Self::Properties, link: ComponentLink<Self>) -> Self {
        Self {
            link,
            client: RpcClient::new(&props.config),
            state: FormState::default(),
            close_task: None,
        }
    }

    fn update(&mut self, msg: Self::Message) -> ShouldRender {
        match msg {
            Msg::Form(event) => {
                if event == Event::Open {
                    self.close_task = None; // dropping cancels the pending timeout
                }

                let (state, effects) = std::mem::take(&mut self.state).update(event);
                self.state = state;

                for effect in effects {
                    self.run(effect);
                }
            }
        }
        true
    }

    fn change(&mut self, props: Self::Properties) -> ShouldRender {
        self.client = RpcClient::new(&props.config);
        false
    }

    fn view(&self) -> Html {
        let modal = self.state.modal();
        let disabled = !self.state.submit_enabled();

        html!{
            <>
                <button id="openPasswordModal" type="button" onclick=self.link.callback(|_| Msg::Form(Event::Open))>
                    {"Change password"}
                </button>
                { for self.state.flash().map(|f| html!{
                    <div class=flash_class(f.is_success())>{f.to_string()}</div>
                })}
                <div class=overlay_class(modal) style=overlay_style(modal)
                    onclick=self.link.batch_callback(|e: MouseEvent| {
                        // only clicks on the backdrop itself, not bubbling from the dialog
                        if e.target() == e.current_target() {
                            vec![Msg::Form(Event::Close(CloseReason::Outside))]
                        } else {
                            vec![]
                        }
                    })
                    onkeydown=self.link.batch_callback(|e: KeyboardEvent| {
                        if e.key() == "Escape" {
                            vec![Msg::Form(Event::Close(CloseReason::Cancel))]
                        } else {
                            vec![]
                        }
                    })
                >
                    <div class="modal-content">
                        <span id="passwordModalClose" class="close" onclick=self.link.callback(|_| Msg::Form(Event::Close(CloseReason::Button)))>
                            {"×"}
                        </span>
                        <h2>{"Change password"}</h2>
                        <form id="passwordForm" onsubmit=self.link.callback(|e: FocusEvent| {
                            e.prevent_default();
                            Msg::Form(Event::Submit)
                        })>
                            { for TOGGLES.iter().map(|t| self.view_field(t)) }
                            { self.view_requirements() }
                            <button id="modalAtualizarBtn" type="submit" disabled=disabled>
                                { if self.state.submitting() { "Updating..." } else { "Update" } }
                            </button>
                        </form>
                    </div>
                </div>
            </>
        }
    }
}

impl PasswordModal {
    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::Remote(call) => {
                let client = self.client.clone();
                self.link.send_future(async move {
                    Msg::Form(perform(&client, call).await)
                });
            }
            Effect::CloseAfter(delay) => {
                trace!(?delay, "close animation");
                let callback = self.link.callback(|_| Msg::Form(Event::CloseAnimationDone));
                self.close_task = Some(TimeoutService::spawn(delay, callback));
            }
        }
    }

    fn view_field(&self, toggle: &Toggle) -> Html {
        let field = toggle.target;
        let state = self.state.field(field);
        let visibility = self.state.visibility();
        let revealed = visibility.is_revealed(field);
        let input_type = visibility.input_type(field);
        let value = self.state.value(field).to_owned();

        html!{
            <div class="form-group">
                <label for=field.input_id()>{label(field)}</label>
                <div class="password-wrapper">
                    <input type=input_type id=field.input_id() name=field.input_id() value=value
                        oninput=self.link.callback(move |e: InputData| Msg::Form(Event::Input(field, e.value)))
                        onblur=self.link.batch_callback(move |_: FocusEvent| {
                            if field == FieldId::Current {
                                vec![Msg::Form(Event::CurrentBlur)]
                            } else {
                                vec![]
                            }
                        })
                    />
                    <span id=toggle.control_id class="toggle-password" onclick=self.link.callback(move |_| Msg::Form(Event::ToggleVisibility(field)))>
                        <span class="eye-visible" style=display(!revealed)>{"👁"}</span>
                        <span class="eye-hidden" style=display(revealed)>{"🙈"}</span>
                    </span>
                </div>
                <div id=field.feedback_id() class=feedback_class(state.kind())>{state.text()}</div>
            </div>
        }
    }

    fn view_requirements(&self) -> Html {
        let r = self.state.requirements();
        html!{
            <ul class="password-requirements">
                <li id="req-length" class=requirement_class(r.length)>{"At least 6 characters"}</li>
                <li id="req-letter" class=requirement_class(r.letter)>{"At least one letter"}</li>
                <li id="req-number" class=requirement_class(r.number)>{"At least one number"}</li>
            </ul>
        }
    }
}

fn label(field: FieldId) -> &'static str {
    match field {
        FieldId::Current => "Current password",
        FieldId::New => "New password",
        FieldId::Confirm => "Confirm new password",
    }
}

pub fn feedback_class(kind: FeedbackKind) -> &'static str {
    match kind {
        FeedbackKind::Neutral => "input-feedback",
        FeedbackKind::Error => "input-feedback error-feedback",
        FeedbackKind::Success => "input-feedback success-feedback",
    }
}

pub fn requirement_class(met: bool) -> &'static str {
    if met { "requirement-met" } else { "" }
}

fn flash_class(success: bool) -> &'static str {
    if success { "alert alert-success" } else { "alert alert-danger" }
}

pub fn overlay_class(modal: Modal) -> &'static str {
    match modal {
        Modal::Open => "modal show",
        Modal::Closing | Modal::Closed => "modal",
    }
}

pub fn overlay_style(modal: Modal) -> &'static str {
    if modal.is_visible() { "display: flex" } else { "display: none" }
}

fn display(shown: bool) -> &'static str {
    if shown { "display: block" } else { "display: none" }
}
