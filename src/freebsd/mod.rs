// bluetooth-adapters Source Code File
//
// Copyright 2020 Nonpolynomial Labs LLC. All rights reserved.
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

pub mod adapters;
pub mod hci;

pub use self::adapters::FreeBsdAdapters;
