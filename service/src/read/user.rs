//! [`User`] read model definition.
//!
//! [`User`]: crate::domain::User

pub mod list {
    //! [`User`]s list definitions.

    use derive_more::{AsRef, Display};

    use crate::domain::User;

    /// Filter of a [`User`]s list.
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    pub struct Filter {
        /// [`NameQuery`] to search the [`User`]s by.
        ///
        /// [`None`] means no filtering at all.
        pub name: Option<NameQuery>,
    }

    impl Filter {
        /// Creates a new [`Filter`] out of the raw `name` query.
        #[must_use]
        pub fn new(name: Option<&str>) -> Self {
            Self {
                name: name.and_then(NameQuery::new),
            }
        }

        /// Checks whether the provided [`User`] satisfies this [`Filter`].
        ///
        /// The [`NameQuery`] is searched in the full name, the first name and
        /// the last name of the [`User`]. An absent name only fails its own
        /// comparison.
        #[must_use]
        pub fn matches(&self, user: &User) -> bool {
            let Some(query) = &self.name else {
                return true;
            };

            user.full_name().is_some_and(|n| query.is_in(&n))
                || user.first_name.as_ref().is_some_and(|n| query.is_in(n))
                || user.last_name.as_ref().is_some_and(|n| query.is_in(n))
        }

        /// Selects the [`User`]s satisfying this [`Filter`], preserving their
        /// order.
        #[must_use]
        pub fn apply<'u>(&self, users: &'u [User]) -> Vec<&'u User> {
            users.iter().filter(|u| self.matches(u)).collect()
        }
    }

    /// Case-insensitive substring to search [`User`]s names for.
    #[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
    #[as_ref(str)]
    pub struct NameQuery(String);

    impl NameQuery {
        /// Creates a new [`NameQuery`] out of the raw `input`.
        ///
        /// [`None`] is returned if the `input` is blank.
        #[must_use]
        pub fn new(input: &str) -> Option<Self> {
            let input = input.trim();
            (!input.is_empty()).then(|| Self(input.to_lowercase()))
        }

        /// Checks whether this [`NameQuery`] is contained in the provided
        /// `name`, ignoring case.
        fn is_in(&self, name: impl AsRef<str>) -> bool {
            name.as_ref().to_lowercase().contains(&self.0)
        }
    }

}
