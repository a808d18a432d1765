// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod transactions;
pub mod investments;
pub mod budgets;
pub mod tax;
pub mod reports;
pub mod importer;
pub mod exporter;
pub mod serve;
