//! Instrument model id decoding.

#![allow(clippy::print_literal)] // Table headers use literal strings

use super::common::parse_family;
use crate::settings::Settings;
use clap::Args;
use rigscope_config::InstrumentFamily;
use rigscope_core::{BANK_SIZE, bank_names, decode_model_id, resolve_instrument_name};

#[derive(Args)]
pub struct DecodeArgs {
    /// Model ids to decode
    #[arg(value_name = "ID")]
    ids: Vec<u32>,

    /// Instrument family (jtv, shuriken); defaults to the settings value
    #[arg(short, long, value_parser = parse_family)]
    family: Option<InstrumentFamily>,

    /// Print every model of the family
    #[arg(long)]
    all: bool,
}

pub fn run(args: DecodeArgs, settings: &Settings) -> anyhow::Result<()> {
    let family = args.family.unwrap_or(settings.instrument_family);

    if args.all {
        print_table(family);
        return Ok(());
    }
    if args.ids.is_empty() {
        anyhow::bail!("no model ids given (pass ids or --all)");
    }

    for id in args.ids {
        let name = resolve_instrument_name(id, family);
        match decode_model_id(id) {
            Some(slot) => println!("{id:4}  {name:16}  bank {} variant {}", slot.bank, slot.variant),
            None => println!("{id:4}  {name}"),
        }
    }
    Ok(())
}

fn print_table(family: InstrumentFamily) {
    println!("{family} models:");
    println!("  {:4}  {}", "ID", "Name");
    for (bank, bank_name) in bank_names(family).iter().enumerate() {
        println!("  -- {bank_name}");
        let first = bank as u32 * BANK_SIZE + 1;
        for id in first..first + BANK_SIZE {
            println!("  {id:4}  {}", resolve_instrument_name(id, family));
        }
    }
}
