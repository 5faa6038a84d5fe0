use common::mem::{as_byte_slice, raw_words, words_from_bytes};
use common::Word;
use mem_lib::packed::{pack_bytes, pack_bytes_strict};
use mem_lib::{ByteOrder, PackedPtr, PackedView, UserImage, UserSegment};

use std::error::Error;
use std::fs::File;
use std::io::Write;

use clap::{Parser, Subcommand, ValueEnum};
use clap_stdin::FileOrStdin;
use log::warn;

#[derive(Clone, Copy, ValueEnum)]
enum Order {
    HighFirst,
    LowFirst,
}

impl From<Order> for ByteOrder {
    fn from(o: Order) -> ByteOrder {
        match o {
            Order::HighFirst => ByteOrder::HighFirst,
            Order::LowFirst => ByteOrder::LowFirst,
        }
    }
}

/// Packed text tool for the 12-bit machine
#[derive(Parser)]
struct Args {
    /// Which sub-field holds the first byte of each word
    #[arg(long, value_enum, default_value_t = Order::HighFirst)]
    order: Order,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Pack text into a word image, two 6-bit bytes per word
    Pack {
        /// Input text file
        input: FileOrStdin,

        /// File name to output to
        #[arg(long, short)]
        output: Option<String>,

        /// Fail instead of truncating bytes wider than 6 bits
        #[arg(long)]
        strict: bool,

        /// Append a zero terminator
        #[arg(long, short)]
        terminate: bool,
    },

    /// Write the packed bytes of a word image to stdout, up to the first zero
    Unpack {
        image: String,
    },

    /// Octal dump of a word image
    Dump {
        image: String,

        /// Treat the file as a user process image
        #[arg(long)]
        user_image: bool,
    },
}

fn pack(input: FileOrStdin, output: Option<String>, strict: bool, terminate: bool, order: ByteOrder) -> Result<(), Box<dyn Error>> {
    let mut bytes = input.contents()?.into_bytes();
    if terminate {
        bytes.push(0);
    }

    let words = if strict {
        pack_bytes_strict(&bytes, order)?
    } else {
        let (words, truncated) = pack_bytes(&bytes, order);
        if truncated > 0 {
            warn!("{truncated} of {} bytes truncated to 6 bits", bytes.len());
        }
        words
    };

    let outname = output.as_deref().unwrap_or("packed.out");
    let mut out = File::create(outname)?;
    out.write_all(as_byte_slice(&raw_words(&words)))?;
    Ok(())
}

fn unpack(image: &str, order: ByteOrder) -> Result<(), Box<dyn Error>> {
    let words = words_from_bytes(&std::fs::read(image)?)?;
    let view = PackedView::with_order(words, order);
    let len = view.length(PackedPtr(0), 0).unwrap_or(view.capacity());
    let bytes = view.read_bytes(PackedPtr(0), len)?;
    std::io::stdout().write_all(&bytes)?;
    Ok(())
}

fn dump(image: &str, user_image: bool, order: ByteOrder) -> Result<(), Box<dyn Error>> {
    let buf = std::fs::read(image)?;
    if user_image {
        let image = UserImage::read_from(&mut buf.as_slice())?;
        println!("entry {:04o}", image.entry);
        println!("text:");
        dump_words(&image.text, UserSegment::Text.base() as usize, order);
        println!("data:");
        dump_words(&image.data, UserSegment::Data.base() as usize, order);
        return Ok(());
    }

    let words = words_from_bytes(&buf)?;
    dump_words(&words, 0, order);
    Ok(())
}

// Address, word, then its two bytes in memory order.
fn dump_words(words: &[Word], base: usize, order: ByteOrder) {
    let (first, second) = (order.subfield(0), order.subfield(1));
    for (i, &w) in words.iter().enumerate() {
        println!("{:04o}: {w}  {:02o} {:02o}", base + i, first.get(w), second.get(w));
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Args::parse();
    let order = args.order.into();
    match args.cmd {
        Cmd::Pack { input, output, strict, terminate } => pack(input, output, strict, terminate, order),
        Cmd::Unpack { image } => unpack(&image, order),
        Cmd::Dump { image, user_image } => dump(&image, user_image, order),
    }
}
