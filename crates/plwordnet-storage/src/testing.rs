//! Small graph shared by the backend tests

use plwordnet_core::{LoadOptions, Wordnet};

const FIXTURE: &str = r###"<array-list>
  <relationtypes id="10" name="hiperonimia" type="relacja synsetów" shortcut="hiper" reverse="11"/>
  <relationtypes id="11" name="hiponimia" type="relacja synsetów" shortcut="hipo"/>
  <relationtypes id="12" name="typ" type="relacja synsetów" shortcut="typ"/>
  <lexical-unit id="1" name="kot" pos="rzeczownik" domain="zw" desc="##D: ssak. [##P: Kot mruczy.]" variant="1"/>
  <lexical-unit id="2" name="ssak" pos="rzeczownik" domain="zw" variant="1"/>
  <lexical-unit id="3" name="byt" pos="rzeczownik" domain="bhp" variant="1"/>
  <lexical-unit id="4" name="cat" pos="rzeczownik pwn" domain="zw" variant="1"/>
  <synset id="100"><unit-id>1</unit-id><unit-id>4</unit-id></synset>
  <synset id="101"><unit-id>2</unit-id></synset>
  <synset id="102"><unit-id>3</unit-id></synset>
  <synsetrelations parent="100" relation="10" child="101"/>
  <synsetrelations parent="100" relation="12" child="102"/>
  <synsetrelations parent="101" relation="10" child="102"/>
  <synsetrelations parent="101" relation="11" child="100"/>
</array-list>"###;

pub fn wordnet() -> Wordnet {
    Wordnet::load(FIXTURE.as_bytes(), &LoadOptions::default()).unwrap()
}
