use gove_states::State;

/// Pages of the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Route {
    #[default]
    Users,
    CreateUser,
    EditUser(u64),
}

impl Route {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Users => "Usuários",
            Self::CreateUser => "Criar novo usuário",
            Self::EditUser(_) => "Editar usuário",
        }
    }

    /// Breadcrumb trail; every crumb but the last links to its route.
    pub fn breadcrumbs(&self) -> Vec<(&'static str, Option<Route>)> {
        match self {
            Self::Users => vec![(Self::Users.title(), None)],
            Self::CreateUser | Self::EditUser(_) => {
                vec![(Self::Users.title(), Some(Self::Users)), (self.title(), None)]
            }
        }
    }
}

impl State for Route {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breadcrumbs_link_back_to_list() {
        assert_eq!(Route::Users.breadcrumbs(), vec![("Usuários", None)]);
        assert_eq!(
            Route::EditUser(3).breadcrumbs(),
            vec![
                ("Usuários", Some(Route::Users)),
                ("Editar usuário", None)
            ]
        );
    }
}
