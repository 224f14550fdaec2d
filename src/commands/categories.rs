// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::categories_by_type;
use crate::models::TransactionType;
use crate::utils::pretty_table;
use anyhow::{anyhow, Result};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        let kinds = match sub.get_one::<String>("type") {
            Some(t) => vec![t.parse::<TransactionType>().map_err(|e| anyhow!(e))?],
            None => TransactionType::ALL.to_vec(),
        };
        println!("{}", pretty_table(&["Type", "Category"], rows(&kinds)));
    }
    Ok(())
}

pub fn rows(kinds: &[TransactionType]) -> Vec<Vec<String>> {
    kinds
        .iter()
        .flat_map(|kind| {
            categories_by_type(*kind)
                .iter()
                .map(move |c| vec![kind.to_string(), (*c).to_string()])
        })
        .collect()
}
