// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side queries.

pub mod admin;
pub mod entries;
pub mod interpretation;
pub mod summary;
pub mod users;
