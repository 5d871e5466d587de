use std::{cell::RefCell, io::Write};

use zcashes::prelude::*;
use zcashes_core::hashes::{MarkedDigestWriter, Personalization};

// ZIP-243 test vector 3, a mainnet P2PKH spend.
static VECTOR_3_TX: &str = "0400008085202f8901a8c685478265f4c14dada651969c45a65e1aeb8cd6791f2f5bb6a1d9952104d9010000006b483045022100a61e5d557568c2ddc1d9b03a7173c6ce7c996c4daecab007ac8f34bee01e6b9702204d38fdc0bcf2728a69fde78462a10fb45a9baa27873e6a5fc45fb5c76764202a01210365ffea3efa3908918a8b8627724af852fc9b86d7375b103ab0543cf418bcaa7ffeffffff02005a6202000000001976a9148132712c3ff19f3a151234616777420a6d7ef22688ac8b959800000000001976a9145453e4698f02a38abdaa521cd1ff2dee6fac187188ac29b0040048b004000000000000000000000000";
static VECTOR_3_SCRIPT_CODE: &str = "76a914507173527b4c3318a2aecd793bf1cfed705950cf88ac";
static VECTOR_3_AMOUNT: u64 = 50_000_000;

fn vector_3() -> ZcashTx {
    ZcashTx::deserialize_hex(VECTOR_3_TX).unwrap()
}

fn vector_3_args(sighash_flag: Sighash, branch_id: BranchId) -> ZcashSighashArgs {
    ZcashSighashArgs {
        index: 0,
        sighash_flag,
        prevout_script: Script::new(hex::decode(VECTOR_3_SCRIPT_CODE).unwrap()),
        prevout_value: VECTOR_3_AMOUNT,
        branch_id,
    }
}

fn outpoint(last_byte: u8, index: u32) -> Outpoint {
    let mut txid = [0u8; 32];
    txid[31] = last_byte;
    Outpoint::new(TXID::from(txid), index)
}

fn scenario_tx() -> ZcashTx {
    ZcashTxBuilder::new()
        .branch_id(BranchId::Sapling)
        .spend(outpoint(1, 0), 0xffff_ffff)
        .pay(1000, &ScriptPubkey::null())
        .expiry_height(499_999_999)
        .build()
}

fn three_by_three() -> ZcashTx {
    ZcashTxBuilder::new()
        .branch_id(BranchId::Sapling)
        .spend(outpoint(1, 0), 1)
        .spend(outpoint(2, 1), 2)
        .spend(outpoint(3, 2), 3)
        .pay(100, &ScriptPubkey::new(vec![0x51]))
        .pay(200, &ScriptPubkey::new(vec![0x52]))
        .pay(300, &ScriptPubkey::new(vec![0x53]))
        .expiry_height(1_000_000)
        .build()
}

fn sign(tx: &ZcashTx, index: usize, sighash_flag: Sighash) -> Blake2b256Digest {
    let args = tx.sighash_args(index, sighash_flag, Script::null(), 5000);
    tx.signature_hash(&args).unwrap()
}

thread_local! {
    static RECORDED: RefCell<Vec<(Personalization, Vec<u8>)>> = RefCell::new(vec![]);
}

/// Records each personalization and the bytes hashed under it, then hashes with BLAKE2b-256.
#[derive(Default)]
struct RecordingWriter {
    personalization: Personalization,
    data: Vec<u8>,
}

impl Write for RecordingWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl MarkedDigestWriter<Blake2b256Digest> for RecordingWriter {
    fn finish(self) -> Blake2b256Digest {
        let mut w = Blake2b256Writer::with_personalization(&self.personalization);
        w.write_all(&self.data).unwrap();
        RECORDED.with(|r| r.borrow_mut().push((self.personalization, self.data)));
        w.finish()
    }
}

impl PersonalizedWriter<Blake2b256Digest> for RecordingWriter {
    fn with_personalization(personalization: &Personalization) -> Self {
        Self {
            personalization: *personalization,
            data: vec![],
        }
    }
}

fn take_recorded() -> Vec<(Personalization, Vec<u8>)> {
    RECORDED.with(|r| r.borrow_mut().drain(..).collect())
}

#[test]
fn it_reproduces_zip243_vector_3() {
    let tx = vector_3();
    let cases = [
        (
            Sighash::All,
            "f3148f80dfab5e573d5edfe7a850f5fd39234f80b5429d3a57edcc11e34c585b",
        ),
        (
            Sighash::None,
            "2f0a186e474c4c2f768c2f55529523a1f3d09d182740cdf0d21bb6752028d70d",
        ),
        (
            Sighash::Single,
            "0b2eb07bf9bf193ac2ca24a4e6874db4f40dbc04364d25d1b278646708cd9325",
        ),
        (
            Sighash::AllACP,
            "310c0c94e32f685d7656edf030bef15e443119cd0ea341dbe5bde9ffb342df67",
        ),
        (
            Sighash::NoneACP,
            "5ccea8d6d22d2b81d16e05e8f04b226bf60326c025e9f8b4e32ce8736cb5a5ad",
        ),
        (
            Sighash::SingleACP,
            "b1eb4b6da75563258c36706aa276f760b5c215910f681d467791d3b17ad20f2c",
        ),
    ];
    for (flag, expected) in cases.iter() {
        let args = vector_3_args(*flag, BranchId::Sapling);
        assert_eq!(
            tx.signature_hash(&args).unwrap().serialize_hex(),
            *expected,
            "sighash {:?}",
            flag
        );
    }

    let blossom = vector_3_args(Sighash::All, BranchId::Blossom);
    assert_eq!(
        tx.signature_hash(&blossom).unwrap().serialize_hex(),
        "8df91420215909927be677a978c36b528e1e7b4ba343acefdd259fe57f3f1f85"
    );
}

#[test]
fn it_parses_and_reencodes_vector_3() {
    let tx = vector_3();
    assert_eq!(tx.header(), 0x8000_0004);
    assert_eq!(tx.version_group_id(), 0x892F_2085);
    assert_eq!(tx.locktime(), 307_241);
    assert_eq!(tx.expiry_height(), 307_272);
    assert_eq!(tx.value_balance(), 0);
    assert_eq!(tx.inputs().len(), 1);
    assert_eq!(tx.inputs()[0].sequence, 0xffff_fffe);
    assert_eq!(tx.inputs()[0].outpoint.index, 1);
    let values: Vec<u64> = tx.outputs().iter().map(|o| o.value).collect();
    assert_eq!(values, vec![40_000_000, 9_999_755]);

    assert_eq!(tx.serialize_hex(), VECTOR_3_TX);
    assert_eq!(tx.serialized_length(), VECTOR_3_TX.len() / 2);
    assert_eq!(
        tx.txid().to_be_hex(),
        "97d8814886d07fc12bbac90c089a10f90906cbb53402ee26e576ef99276c492d"
    );
}

#[test]
fn it_reproduces_the_single_input_scenario() {
    let tx = scenario_tx();
    assert_eq!(
        sign(&tx, 0, Sighash::All).serialize_hex(),
        "3883993500d1d7601f3471471df1c3169126c61f2e33f8ad281f0234dbdb7cb2"
    );
    assert_eq!(
        sign(&tx.with_branch_id(BranchId::Blossom), 0, Sighash::All).serialize_hex(),
        "203d0bd91ebf94d188c8d059bbf9085ff19a4780e410332d73767a0b12d25c16"
    );
}

#[test]
fn it_hashes_through_the_injected_writer() {
    let tx = scenario_tx();
    let args = tx.sighash_args(0, Sighash::All, Script::null(), 5000);

    take_recorded();
    let digest = tx.signature_hash_with::<RecordingWriter>(&args).unwrap();
    assert_eq!(digest, tx.signature_hash(&args).unwrap());

    let recorded = take_recorded();
    let personalizations: Vec<&[u8]> = recorded.iter().map(|(p, _)| &p[..]).collect();
    assert_eq!(
        personalizations,
        vec![
            &b"ZcashPrevoutHash"[..],
            &b"ZcashSequencHash"[..],
            &b"ZcashOutputsHash"[..],
            &b"ZcashSigHash\xbb\x09\xb8\x76"[..],
        ]
    );

    // outpoint, sequence, and output encodings
    assert_eq!(recorded[0].1.len(), 36);
    assert_eq!(hex::encode(&recorded[1].1), "ffffffff");
    assert_eq!(hex::encode(&recorded[2].1), "e80300000000000000");

    let mut preimage = vec![];
    tx.write_sighash_preimage::<_, Blake2b256Writer>(&mut preimage, &args)
        .unwrap();
    assert_eq!(recorded[3].1, preimage);
}

#[test]
fn it_skips_excluded_components() {
    let tx = three_by_three();

    take_recorded();
    let args = tx.sighash_args(1, Sighash::NoneACP, Script::null(), 5000);
    tx.signature_hash_with::<RecordingWriter>(&args).unwrap();
    let recorded = take_recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(&recorded[0].0[..12], b"ZcashSigHash");

    let args = tx.sighash_args(1, Sighash::Single, Script::null(), 5000);
    tx.signature_hash_with::<RecordingWriter>(&args).unwrap();
    let recorded = take_recorded();
    assert_eq!(recorded.len(), 3);
    assert_eq!(&recorded[0].0, b"ZcashPrevoutHash");
    assert_eq!(&recorded[1].0, b"ZcashOutputsHash");
    // only output 1 is committed
    assert_eq!(hex::encode(&recorded[1].1), "c800000000000000".to_owned() + "0152");
}

#[test]
fn it_commits_to_every_output_under_all() {
    let tx = three_by_three();
    let base = tx.hash_outputs::<Blake2b256Writer>(0, Sighash::All).unwrap();
    let base_digest = sign(&tx, 0, Sighash::All);

    for k in 0..3 {
        let mut outputs = tx.outputs().to_vec();
        outputs[k].value += 1;
        let changed = rebuild_with_outputs(&tx, outputs);
        assert_ne!(
            changed.hash_outputs::<Blake2b256Writer>(0, Sighash::All).unwrap(),
            base
        );
        assert_ne!(sign(&changed, 0, Sighash::All), base_digest);
    }
}

fn rebuild_with_outputs(tx: &ZcashTx, outputs: Vec<TxOut>) -> ZcashTx {
    ZcashTxBuilder::new()
        .branch_id(tx.branch_id())
        .locktime(tx.locktime())
        .expiry_height(tx.expiry_height())
        .extend_inputs(tx.inputs().to_vec())
        .extend_outputs(outputs)
        .build()
}

fn rebuild_with_inputs(tx: &ZcashTx, inputs: Vec<ZcashTxIn>) -> ZcashTx {
    ZcashTxBuilder::new()
        .branch_id(tx.branch_id())
        .locktime(tx.locktime())
        .expiry_height(tx.expiry_height())
        .extend_inputs(inputs)
        .extend_outputs(tx.outputs().to_vec())
        .build()
}

#[test]
fn it_ignores_outputs_under_none() {
    let tx = three_by_three();
    for flag in [Sighash::None, Sighash::NoneACP].iter() {
        assert_eq!(
            tx.hash_outputs::<Blake2b256Writer>(0, *flag).unwrap(),
            Blake2b256Digest::default()
        );
    }

    let mut outputs = tx.outputs().to_vec();
    outputs[2].value = 1;
    outputs.pop();
    let changed = rebuild_with_outputs(&tx, outputs);
    assert_eq!(sign(&tx, 0, Sighash::None), sign(&changed, 0, Sighash::None));
}

#[test]
fn it_commits_only_to_the_matching_output_under_single() {
    let tx = three_by_three();
    let base = tx.hash_outputs::<Blake2b256Writer>(1, Sighash::Single).unwrap();

    let mut others_changed = tx.outputs().to_vec();
    others_changed[0].value = 1;
    others_changed[2].script_pubkey = ScriptPubkey::null();
    let others_changed = rebuild_with_outputs(&tx, others_changed);
    assert_eq!(
        others_changed
            .hash_outputs::<Blake2b256Writer>(1, Sighash::Single)
            .unwrap(),
        base
    );
    assert_eq!(
        sign(&tx, 1, Sighash::Single),
        sign(&others_changed, 1, Sighash::Single)
    );

    let mut own_changed = tx.outputs().to_vec();
    own_changed[1].value = 1;
    let own_changed = rebuild_with_outputs(&tx, own_changed);
    assert_ne!(
        own_changed
            .hash_outputs::<Blake2b256Writer>(1, Sighash::Single)
            .unwrap(),
        base
    );
}

#[test]
fn it_ignores_other_inputs_under_anyonecanpay() {
    let tx = three_by_three();
    for flag in [Sighash::AllACP, Sighash::NoneACP, Sighash::SingleACP].iter() {
        assert_eq!(
            tx.hash_prevouts::<Blake2b256Writer>(*flag).unwrap(),
            Blake2b256Digest::default()
        );
        assert_eq!(
            tx.hash_sequence::<Blake2b256Writer>(*flag).unwrap(),
            Blake2b256Digest::default()
        );
    }

    let mut inputs = tx.inputs().to_vec();
    inputs[0].outpoint = outpoint(9, 9);
    inputs[2].sequence = 0;
    let changed = rebuild_with_inputs(&tx, inputs);

    assert_eq!(sign(&tx, 1, Sighash::AllACP), sign(&changed, 1, Sighash::AllACP));
    assert_ne!(sign(&tx, 1, Sighash::All), sign(&changed, 1, Sighash::All));
}

#[test]
fn it_drops_sequences_under_none_and_single() {
    let tx = three_by_three();
    let mut inputs = tx.inputs().to_vec();
    inputs[2].sequence = 0;
    let changed = rebuild_with_inputs(&tx, inputs);

    for flag in [Sighash::None, Sighash::Single].iter() {
        assert_eq!(sign(&tx, 0, *flag), sign(&changed, 0, *flag));
    }
    assert_ne!(sign(&tx, 0, Sighash::All), sign(&changed, 0, Sighash::All));
}

#[test]
fn it_is_deterministic_and_branch_sensitive() {
    let tx = three_by_three();
    let first = sign(&tx, 2, Sighash::All);
    assert_eq!(first, sign(&tx, 2, Sighash::All));

    let sapling = tx.sighash_args(2, Sighash::All, Script::null(), 5000);
    let blossom = ZcashSighashArgs {
        branch_id: BranchId::Blossom,
        ..sapling.clone()
    };
    assert_ne!(
        tx.signature_hash(&sapling).unwrap(),
        tx.signature_hash(&blossom).unwrap()
    );
}

#[test]
fn it_signs_inputs_from_many_threads() {
    let tx = three_by_three();
    let expected: Vec<Blake2b256Digest> = (0..3).map(|i| sign(&tx, i, Sighash::All)).collect();

    let tx_ref = &tx;
    let digests: Vec<Blake2b256Digest> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..3)
            .map(|i| s.spawn(move || sign(tx_ref, i, Sighash::All)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(digests, expected);
}

#[test]
fn it_round_trips_through_serde() {
    let tx = vector_3().with_branch_id(BranchId::Sapling);
    let json = serde_json::to_string(&tx).unwrap();
    let parsed: ZcashTx = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, tx);
    assert_eq!(parsed.serialize_hex(), VECTOR_3_TX);
}
