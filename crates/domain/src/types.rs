// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Role classification of a user.
///
/// Controllers (`CTL`) and project leads (`PL`) see admin panels in the
/// frontend; developers (`DEV`) only see their own tracking grid. The backend
/// stores the classification but does not enforce panel visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UserType {
    /// Developer. Standard time-tracking user.
    #[default]
    Dev,
    /// Controlling. Has access to all reporting data.
    Ctl,
    /// Project lead.
    Pl,
}

impl UserType {
    /// Converts this user type to its database string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dev => "DEV",
            Self::Ctl => "CTL",
            Self::Pl => "PL",
        }
    }
}

impl FromStr for UserType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEV" => Ok(Self::Dev),
            "CTL" => Ok(Self::Ctl),
            "PL" => Ok(Self::Pl),
            _ => Err(DomainError::InvalidUserType(s.to_string())),
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of an external ticket system.
///
/// Only `JIRA` systems participate in automatic worklog booking; `OTRS` and
/// `FRESHDESK` systems are used for ticket lookups and reference URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketSystemType {
    Jira,
    Otrs,
    Freshdesk,
}

impl TicketSystemType {
    /// Converts this ticket system type to its database string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Jira => "JIRA",
            Self::Otrs => "OTRS",
            Self::Freshdesk => "FRESHDESK",
        }
    }
}

impl FromStr for TicketSystemType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "JIRA" => Ok(Self::Jira),
            "OTRS" => Ok(Self::Otrs),
            "FRESHDESK" => Ok(Self::Freshdesk),
            _ => Err(DomainError::InvalidTicketSystemType(s.to_string())),
        }
    }
}

impl std::fmt::Display for TicketSystemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
