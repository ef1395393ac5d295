//! Create/edit form: field state, loading of the edited user and submission.

use std::collections::BTreeSet;

use gove_states::{
    Command, CommandFuture, CommandSnapshot, Compute, LatestOnlyUpdater, State, StateCtx,
};
use log::{error, info, warn};
use tokio_util::sync::CancellationToken;

use crate::ApiError;
use crate::format::format_phone_mask;
use crate::http::ApiClient;
use crate::notification::{Notification, Notifications};
use crate::route::Route;
use crate::types::{User, UserFormValues};
use crate::users::api;
use crate::users::validation::{FieldErrors, FormField, validate};

pub const CREATE_SUCCESS_TITLE: &str = "Usuário criado com sucesso!";
pub const UPDATE_SUCCESS_TITLE: &str = "Usuário atualizado com sucesso!";
pub const SUBMIT_SUCCESS_TEXT: &str = "As alterações foram salvas.";
pub const SUBMIT_ERROR_TITLE: &str = "Erro ao enviar o formulário.";
pub const EMAIL_ERROR_TITLE: &str = "Email já existente ou inválido";
pub const SUBMIT_ERROR_TEXT: &str =
    "Ocorreu um erro ao enviar o formulário. Por favor, tente novamente.";
pub const USER_NOT_FOUND: &str = "Nenhum usuário encontrado.";

/// Options of the user type select: (value, label).
pub const USER_TYPES: [(&str, &str); 2] = [("admin", "admin"), ("user", "user")];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit(u64),
}

/// Whether the form has its initial values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormLoad {
    #[default]
    Ready,
    Loading,
    NotFound,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFormState {
    mode: FormMode,
    load: FormLoad,
    values: UserFormValues,
    touched: BTreeSet<FormField>,
    submitting: bool,
}

impl UserFormState {
    pub fn create() -> Self {
        Self::default()
    }

    /// An edit form waiting for `GET /users/{id}`.
    pub fn edit(id: u64) -> Self {
        Self {
            mode: FormMode::Edit(id),
            load: FormLoad::Loading,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn load(&self) -> FormLoad {
        self.load
    }

    pub fn values(&self) -> &UserFormValues {
        &self.values
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.values.name,
            FormField::Email => &self.values.email,
            FormField::Phone => &self.values.phone,
            FormField::UserType => &self.values.user_type,
            FormField::Sector => &self.values.sector,
        }
    }

    /// Sets a field without touching it. The phone is re-masked.
    pub fn set_value(&mut self, field: FormField, value: &str) {
        let slot = match field {
            FormField::Name => &mut self.values.name,
            FormField::Email => &mut self.values.email,
            FormField::Phone => &mut self.values.phone,
            FormField::UserType => &mut self.values.user_type,
            FormField::Sector => &mut self.values.sector,
        };
        *slot = match field {
            FormField::Phone => format_phone_mask(value),
            _ => value.to_owned(),
        };
    }

    pub fn touch(&mut self, field: FormField) {
        self.touched.insert(field);
    }

    pub fn is_touched(&self, field: FormField) -> bool {
        self.touched.contains(&field)
    }

    pub fn errors(&self) -> FieldErrors {
        validate(&self.values)
    }

    /// Error to show under `field`: only once the field was touched.
    pub fn visible_error(&self, field: FormField) -> Option<&'static str> {
        if !self.is_touched(field) {
            return None;
        }
        self.errors().get(&field).copied()
    }

    pub fn is_permission_checked(&self, id: u64) -> bool {
        self.values.permissions.contains(&id)
    }

    pub fn set_permission(&mut self, id: u64, checked: bool) {
        if checked {
            if !self.values.permissions.contains(&id) {
                self.values.permissions.push(id);
            }
        } else {
            self.values.permissions.retain(|p| *p != id);
        }
    }

    /// Values loaded from the server for the edited user.
    pub fn fill(&mut self, values: UserFormValues) {
        self.values = values;
        self.load = FormLoad::Ready;
    }

    pub fn mark_not_found(&mut self) {
        self.load = FormLoad::NotFound;
    }

    /// Touches every field and validates. With no errors the form becomes
    /// submitting; otherwise the errors are returned and nothing is sent.
    pub fn begin_submit(&mut self) -> Result<(), FieldErrors> {
        self.touched.extend(FormField::ALL);
        let errors = self.errors();
        if !errors.is_empty() {
            return Err(errors);
        }
        self.submitting = true;
        Ok(())
    }

    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }
}

impl State for UserFormState {
    fn snapshot(&self) -> Option<Box<dyn State>> {
        Some(Box::new(self.clone()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadUserResult {
    #[default]
    Idle,
    Loaded(User),
    Error { id: u64, error: ApiError },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadUserCompute {
    pub result: LoadUserResult,
}

impl State for LoadUserCompute {}
impl Compute for LoadUserCompute {}

/// Loads the user edited by [`UserFormState`].
#[derive(Debug, Default)]
pub struct LoadUserCommand;

impl Command for LoadUserCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let (client, id) = match (
            snap.try_state::<ApiClient>(),
            snap.try_state::<UserFormState>(),
        ) {
            (Ok(client), Ok(form)) => match form.mode() {
                FormMode::Edit(id) => (client.clone(), id),
                FormMode::Create => {
                    warn!("LoadUserCommand dispatched for a create form");
                    return Box::pin(async {});
                }
            },
            (Err(err), _) | (_, Err(err)) => {
                error!("LoadUserCommand: {err}");
                return Box::pin(async {});
            }
        };

        Box::pin(async move {
            tokio::select! {
                () = cancel.cancelled() => {
                    info!("LoadUserCommand for user {id} cancelled");
                }
                result = api::get_user(&client, id) => {
                    let result = match result {
                        Ok(user) => LoadUserResult::Loaded(user),
                        Err(error) => {
                            warn!("Failed to load user {id}: {error}");
                            LoadUserResult::Error { id, error }
                        }
                    };
                    updater.set(LoadUserCompute { result });
                }
            }
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitUserResult {
    #[default]
    Idle,
    Saved { mode: FormMode, user: User },
    Error(ApiError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitUserCompute {
    pub result: SubmitUserResult,
}

impl State for SubmitUserCompute {}
impl Compute for SubmitUserCompute {}

/// Creates or updates the user described by [`UserFormState`].
#[derive(Debug, Default)]
pub struct SubmitUserCommand;

impl Command for SubmitUserCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let (client, mode, values) = match (
            snap.try_state::<ApiClient>(),
            snap.try_state::<UserFormState>(),
        ) {
            (Ok(client), Ok(form)) => (client.clone(), form.mode(), form.values().clone()),
            (Err(err), _) | (_, Err(err)) => {
                error!("SubmitUserCommand: {err}");
                return Box::pin(async {});
            }
        };

        Box::pin(async move {
            let request = async {
                match mode {
                    FormMode::Create => api::create_user(&client, &values).await,
                    FormMode::Edit(id) => api::update_user(&client, id, &values).await,
                }
            };
            tokio::select! {
                () = cancel.cancelled() => {
                    info!("SubmitUserCommand cancelled");
                }
                result = request => {
                    let result = match result {
                        Ok(user) => SubmitUserResult::Saved { mode, user },
                        Err(err) => {
                            error!("Failed to submit user form: {err}");
                            SubmitUserResult::Error(err)
                        }
                    };
                    updater.set(SubmitUserCompute { result });
                }
            }
        })
    }
}

/// Validates and, when valid, queues the create/update call.
pub fn submit_form(ctx: &mut StateCtx) {
    let form = ctx.state_mut::<UserFormState>();
    if form.is_submitting() {
        return;
    }
    match form.begin_submit() {
        Ok(()) => ctx.enqueue_command::<SubmitUserCommand>(),
        Err(errors) => info!("User form has {} invalid fields", errors.len()),
    }
}

/// Notification for a failed submit; an `email` field error gets its own title.
pub fn submit_error_notification(error: &ApiError) -> Notification {
    let title = if error.has_field_error("email") {
        EMAIL_ERROR_TITLE
    } else {
        SUBMIT_ERROR_TITLE
    };
    Notification::error(title, SUBMIT_ERROR_TEXT)
}

/// Applies finished load and submit calls to the form.
pub fn reconcile_form(ctx: &mut StateCtx) {
    if !matches!(
        ctx.cached::<LoadUserCompute>().map(|c| &c.result),
        None | Some(LoadUserResult::Idle)
    ) {
        match std::mem::take(&mut ctx.state_mut::<LoadUserCompute>().result) {
            LoadUserResult::Loaded(user) => {
                let form = ctx.state_mut::<UserFormState>();
                if form.mode() == FormMode::Edit(user.id) {
                    form.fill(UserFormValues::from_user(&user));
                }
            }
            LoadUserResult::Error { id, .. } => {
                let form = ctx.state_mut::<UserFormState>();
                if form.mode() == FormMode::Edit(id) {
                    form.mark_not_found();
                }
            }
            LoadUserResult::Idle => {}
        }
    }

    if !matches!(
        ctx.cached::<SubmitUserCompute>().map(|c| &c.result),
        None | Some(SubmitUserResult::Idle)
    ) {
        let notification = match std::mem::take(&mut ctx.state_mut::<SubmitUserCompute>().result)
        {
            SubmitUserResult::Saved { mode, user } => {
                info!("User {} saved", user.id);
                let title = match mode {
                    FormMode::Create => CREATE_SUCCESS_TITLE,
                    FormMode::Edit(_) => UPDATE_SUCCESS_TITLE,
                };
                Some(Notification::success(title, SUBMIT_SUCCESS_TEXT).then_navigate(Route::Users))
            }
            SubmitUserResult::Error(err) => Some(submit_error_notification(&err)),
            SubmitUserResult::Idle => None,
        };
        ctx.update::<UserFormState>(UserFormState::finish_submit);
        if let Some(notification) = notification {
            ctx.update::<Notifications>(|n| n.show(notification));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_only_show_for_touched_fields() {
        let mut form = UserFormState::create();
        assert_eq!(form.visible_error(FormField::Name), None);

        form.set_value(FormField::Name, "Jo");
        assert_eq!(form.visible_error(FormField::Name), None);

        form.touch(FormField::Name);
        assert_eq!(
            form.visible_error(FormField::Name),
            Some("Nome deve ter pelo menos 3 caracteres")
        );
        assert_eq!(form.visible_error(FormField::Email), None);
    }

    #[test]
    fn user_types_are_labelled_by_their_value() {
        assert_eq!(USER_TYPES.map(|(_, label)| label), ["admin", "user"]);
    }

    #[test]
    fn phone_is_masked_on_every_change() {
        let mut form = UserFormState::create();
        form.set_value(FormField::Phone, "619888");
        assert_eq!(form.value(FormField::Phone), "(61) 9888");
        form.set_value(FormField::Phone, "(61) 98888-77771");
        assert_eq!(form.value(FormField::Phone), "(61) 98888-7777");
    }

    #[test]
    fn permissions_are_never_duplicated() {
        let mut form = UserFormState::create();
        form.set_permission(4, true);
        form.set_permission(4, true);
        form.set_permission(7, true);
        assert_eq!(form.values().permissions, vec![4, 7]);

        form.set_permission(4, false);
        assert!(!form.is_permission_checked(4));
        assert!(form.is_permission_checked(7));
    }

    #[test]
    fn invalid_submit_touches_everything_and_stays_idle() {
        let mut form = UserFormState::create();
        let errors = form.begin_submit().unwrap_err();

        assert_eq!(errors.len(), FormField::ALL.len());
        assert!(!form.is_submitting());
        assert!(FormField::ALL.iter().all(|f| form.is_touched(*f)));
    }

    #[test]
    fn invalid_form_never_queues_the_submit() {
        let mut ctx = StateCtx::new();
        ctx.add_state(UserFormState::create());
        ctx.record_command(SubmitUserCommand);

        submit_form(&mut ctx);

        assert!(!ctx.has_pending_commands());
        assert!(ctx.state::<UserFormState>().is_touched(FormField::Sector));
    }

    #[test]
    fn valid_form_queues_the_submit_once() {
        let mut ctx = StateCtx::new();
        let mut form = UserFormState::create();
        form.set_value(FormField::Name, "Ana Souza");
        form.set_value(FormField::Email, "ana@gove.br");
        form.set_value(FormField::Phone, "61988887777");
        form.set_value(FormField::UserType, "admin");
        form.set_value(FormField::Sector, "SEPLAG");
        ctx.add_state(form);
        ctx.record_command(SubmitUserCommand);

        submit_form(&mut ctx);
        submit_form(&mut ctx);

        assert!(ctx.state::<UserFormState>().is_submitting());
        assert!(ctx.has_pending_commands());
    }

    #[test]
    fn email_field_errors_get_their_own_title() {
        let taken = ApiError::Status {
            status: 422,
            body: r#"{"errors":{"email":["The email has already been taken."]}}"#.into(),
        };
        assert_eq!(submit_error_notification(&taken).title, EMAIL_ERROR_TITLE);

        let other = ApiError::Status {
            status: 500,
            body: String::new(),
        };
        assert_eq!(submit_error_notification(&other).title, SUBMIT_ERROR_TITLE);
    }

    #[test]
    fn load_result_for_another_user_is_ignored() {
        let mut ctx = StateCtx::new();
        ctx.add_state(UserFormState::edit(2));
        ctx.record_compute(LoadUserCompute {
            result: LoadUserResult::Error {
                id: 1,
                error: ApiError::Status {
                    status: 404,
                    body: String::new(),
                },
            },
        });

        reconcile_form(&mut ctx);
        assert_eq!(ctx.state::<UserFormState>().load(), FormLoad::Loading);
    }
}
