use crate::cli::AnnotateArgs;
use crate::error::AnnotationResult;
use crate::genes::{
    read_records, GeneErrorPolicy, GeneFeatureSet, GeneRecordAssembler, SequenceRecord,
};
use crate::utils::{create_writer, load_variant_index, open_text_reader, Result};
use crate::writers::FeatureWriter;
use crossbeam_channel::{bounded, Receiver, Sender};
use rayon::{
    iter::{ParallelBridge, ParallelIterator},
    ThreadPoolBuilder,
};
use std::{
    collections::BTreeMap,
    io::{BufRead, Write},
    sync::atomic::{AtomicBool, Ordering},
    thread,
};

const CHANNEL_BUFFER_SIZE: usize = 2048;

type NumberedRecord = (usize, AnnotationResult<SequenceRecord>);
type NumberedGene = (usize, AnnotationResult<GeneFeatureSet>);

#[derive(Debug, Default, PartialEq)]
struct WriteSummary {
    written: usize,
    skipped: usize,
}

pub fn annotate(args: AnnotateArgs) -> Result<()> {
    let index = load_variant_index(&args.motifs_path, args.alphabet)?;
    let genes_reader = open_text_reader(&args.genes_path)?;

    let mut feature_writer = create_writer(&args.output_prefix, "genes.tsv", |genes_path| {
        create_writer(&args.output_prefix, "motifs.tsv", |motifs_path| {
            FeatureWriter::new(genes_path, motifs_path)
        })
    })?;

    let (sender_record, receiver_record) = bounded(CHANNEL_BUFFER_SIZE);
    let record_stream_thread =
        thread::spawn(move || stream_records_into_channel(genes_reader, sender_record));

    let (sender_result, receiver_result) = bounded(CHANNEL_BUFFER_SIZE);
    let policy = args.on_gene_error;
    let writer_thread = thread::spawn(move || -> Result<WriteSummary> {
        let summary = write_in_input_order(receiver_result, &mut feature_writer, policy)?;
        feature_writer.finish()?;
        Ok(summary)
    });

    log::debug!(
        "Initializing thread pool with {} threads...",
        args.num_threads
    );
    let pool = ThreadPoolBuilder::new()
        .num_threads(args.num_threads)
        .thread_name(|i| format!("motifmark-{}", i))
        .build()
        .map_err(|e| format!("Failed to initialize thread pool: {}", e))?;

    let assembler = GeneRecordAssembler::new(&index);
    let writer_stopped = AtomicBool::new(false);
    pool.install(|| {
        receiver_record
            .into_iter()
            .par_bridge()
            .for_each_with(sender_result, |s, (record_number, record)| {
                // Remaining records are drained unannotated
                if writer_stopped.load(Ordering::Relaxed) {
                    return;
                }
                let result = record.and_then(|record| assembler.assemble(&record));
                if s.send((record_number, result)).is_err() {
                    log::trace!("Writer stopped before record {}", record_number);
                    writer_stopped.store(true, Ordering::Relaxed);
                }
            });
    });

    let summary = writer_thread.join().expect("Writer thread panicked");
    log::trace!("Writer thread finished");
    record_stream_thread
        .join()
        .expect("Record stream thread panicked");

    let summary = summary.map_err(|e| {
        log::error!(
            "Output files {prefix}.genes.tsv and {prefix}.motifs.tsv are incomplete",
            prefix = args.output_prefix
        );
        e
    })?;

    log::info!(
        "Annotated genes: written={}, skipped={}",
        summary.written,
        summary.skipped
    );
    Ok(())
}

fn stream_records_into_channel<R: BufRead>(reader: R, sender: Sender<NumberedRecord>) {
    for numbered_record in read_records(reader).enumerate() {
        if sender.send(numbered_record).is_err() {
            log::trace!("Record receiver closed");
            return;
        }
    }
}

/// Results arrive in completion order; genes are released strictly by record number.
fn write_in_input_order<W: Write>(
    receiver: Receiver<NumberedGene>,
    writer: &mut FeatureWriter<W>,
    policy: GeneErrorPolicy,
) -> Result<WriteSummary> {
    let mut reorder_buffer = BTreeMap::new();
    let mut next_record = 0;
    let mut summary = WriteSummary::default();

    for (record_number, result) in &receiver {
        reorder_buffer.insert(record_number, result);
        while let Some(result) = reorder_buffer.remove(&next_record) {
            next_record += 1;
            match policy.apply(result).map_err(|e| e.to_string())? {
                Some(gene) => {
                    writer.write(&gene)?;
                    summary.written += 1;
                }
                None => summary.skipped += 1,
            }
        }
    }

    if !reorder_buffer.is_empty() {
        return Err(format!(
            "{} records could not be written after record {}",
            reorder_buffer.len(),
            next_record
        ));
    }
    Ok(summary)
}
